use serde::Serialize;
use statrs::function::erf::erfc;
use std::f64::consts::{LN_10, PI, SQRT_2};

use crate::domain::reliability::propagation_model::{NlosExponent, PropagationModel};
use crate::error::ReliabilityError;

/// Density of millimeter-wave links per unit area.
const LINK_DENSITY: f64 = 100.0;

/// Millimeter-wave channel bandwidth in Hz.
const CHANNEL_BANDWIDTH_HZ: f64 = 2e9;

/// Fractional line-of-sight area of the blockage model.
const LOS_FRACTIONAL_AREA: f64 = 0.11;

/// Maximum antenna gain in dB.
const ANTENNA_GAIN_DB: f64 = 18.0;

/// Transmit power in dBm.
const TRANSMIT_POWER_DBM: f64 = 30.0;

/// Thermal noise density in dBm/Hz and receiver noise figure in dB.
const NOISE_DENSITY_DBM_HZ: f64 = -174.0;
const NOISE_FIGURE_DB: f64 = 10.0;

/// Lognormal shadowing standard deviations (dB) for the line-of-sight and non-line-of-sight regimes.
const SHADOWING_LOS_DB: f64 = 5.2;
const SHADOWING_NLOS_DB: f64 = 7.6;

/// SINR threshold in dB a receiver needs to decode.
const SINR_THRESHOLD_DB: f64 = 3.0;

/// Physical model giving the probability that a millimeter-wave link of a given length
/// delivers a packet.
///
/// The computation is a closed-form stochastic-geometry pipeline: path loss, SNR at the
/// receiver, a blockage-adjusted connectivity probability built from Gaussian Q-functions
/// over two shadowing regimes, and finally `Ps = 1 - exp(-density * ma * factor)`.
/// It is pure, so the same length always yields the bit-identical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReliabilityModel {
    pub propagation: PropagationModel,
    pub nlos_exponent: NlosExponent,
}

impl ReliabilityModel {
    pub fn new(propagation: PropagationModel) -> Self {
        Self { propagation, nlos_exponent: NlosExponent::default() }
    }

    pub fn with_nlos_exponent(mut self, nlos_exponent: NlosExponent) -> Self {
        self.nlos_exponent = nlos_exponent;
        self
    }

    /// Probability in [0, 1] that a link of `length` meters delivers a packet.
    ///
    /// # Errors
    /// * `ReliabilityError::InvalidLength` if `length` is not a positive finite number.
    /// * `ReliabilityError::OutOfRange` if the formula yields NaN or leaves [0, 1].
    pub fn success_probability(&self, length: f64) -> Result<f64, ReliabilityError> {
        if !length.is_finite() || length <= 0.0 {
            return Err(ReliabilityError::InvalidLength(length));
        }

        let d = length;
        let alpha = self.propagation.alpha();
        let beta = self.propagation.beta();
        let pl = self.propagation.path_loss_db(d);

        // Reference SNR from transmit power, antenna gain and the thermal noise floor.
        let pn = NOISE_DENSITY_DBM_HZ + 10.0 * CHANNEL_BANDWIDTH_HZ.log10() + NOISE_FIGURE_DB;
        let snr0 = TRANSMIT_POWER_DBM + ANTENNA_GAIN_DB - pn;
        let snr = snr0 - pl;
        let snr_lin = db_to_linear(snr);

        // Lognormal means and deviations of both blockage regimes, one-meter loss = alpha.
        let one_meter_loss_lin = db_to_linear(alpha);
        let m_los = -one_meter_loss_lin.ln();
        let sigma_los = 0.1 * SHADOWING_LOS_DB * LN_10;
        let m_nlos = -one_meter_loss_lin.ln();
        let sigma_nlos = 0.1 * SHADOWING_NLOS_DB * LN_10;

        let factor = snr_lin / db_to_linear(SINR_THRESHOLD_DB);

        let nlos_exponent = match self.nlos_exponent {
            NlosExponent::PropagationExponent => beta,
            NlosExponent::PathLossDb => pl,
        };

        let pc1_los = q_function(((d.powf(beta) / factor).ln() - m_los) / sigma_los);
        let pc1_nlos = q_function(((d.powf(nlos_exponent) / factor).ln() - m_nlos) / sigma_nlos);
        let pc1 = d.powf(2.0) * (pc1_los - pc1_nlos);
        let pc2 = blockage_scale(sigma_los, m_los, beta, factor) * blockage_tail(sigma_los, m_los, d, beta, factor);
        let pc3 = blockage_scale(sigma_nlos, m_nlos, beta, factor) * (1.0 / LOS_FRACTIONAL_AREA - blockage_tail(sigma_nlos, m_nlos, d, beta, factor));
        let pc = pc1 + pc2 + pc3;

        let lamda_a = LINK_DENSITY * PI * LOS_FRACTIONAL_AREA * pc;
        let ma = lamda_a / LINK_DENSITY;
        let ps = 1.0 - (-LINK_DENSITY * ma * factor).exp();

        if !(0.0..=1.0).contains(&ps) {
            return Err(ReliabilityError::OutOfRange { length, value: ps });
        }

        Ok(ps)
    }
}

/// `Ps` under the default 28 GHz model.
pub fn success_probability(length: f64) -> Result<f64, ReliabilityError> {
    ReliabilityModel::default().success_probability(length)
}

fn db_to_linear(db: f64) -> f64 {
    10f64.powf(db / 10.0)
}

/// Gaussian tail probability `Q(x) = 0.5 * erfc(x / sqrt(2))`.
fn q_function(x: f64) -> f64 {
    0.5 * erfc(x / SQRT_2)
}

fn blockage_scale(sigma: f64, m: f64, beta: f64, factor: f64) -> f64 {
    factor.powf(2.0 / beta) * (2.0 * ((sigma * sigma) / (beta * beta)) + 2.0 * (m / beta)).exp()
}

fn blockage_tail(sigma: f64, m: f64, d: f64, beta: f64, factor: f64) -> f64 {
    q_function((sigma * sigma * (2.0 / beta) - d.powf(beta / factor).ln() + m) / sigma)
}
