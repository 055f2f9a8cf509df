//! Weighted reservoir sampling engines
//!
//! Two families of weight bias:
//!
//! - **Order sampling** ([`OrderSampler`]): every item receives an
//!   independent key drawn from a weight-dependent distribution and the k
//!   largest keys form the sample. The schemes differ only in the key's
//!   distribution: [`ARes`] (Efraimidis-Spirakis), [`SequentialPoisson`]
//!   (Ohlsson), and [`Pareto`] (Rosen).
//! - **Strictly proportional sampling** ([`ChaoSampler`]): every item's
//!   inclusion probability equals `min(1, k * w / sum(w))` exactly, at the
//!   cost of recomputing inclusion probabilities as the weight sum grows.
//!
//! Use order sampling when "heavier is more likely" is enough; use Chao
//! when the inclusion probabilities themselves must be proportional.

pub mod chao;
pub mod efraimidis;
pub mod item;
pub mod order;
pub mod pareto;
pub mod sequential_poisson;

pub use chao::ChaoSampler;
pub use efraimidis::{ARes, EfraimidisSampler};
pub use item::WeightedItem;
pub use order::{OrderSampler, OrderScheme};
pub use pareto::{Pareto, ParetoSampler};
pub use sequential_poisson::{SequentialPoisson, SequentialPoissonSampler};
