pub mod decorrelate;
pub mod eds;
pub mod error;
pub mod greedy;
pub mod inverse;
pub mod normalize;
pub mod svd;
mod utils;

pub use decorrelate::{Basis, Decorrelator, DEFAULT_RANK_TOLERANCE};
pub use eds::{construct_eds, uniform_tolerance, Eds, EdsBuilder, EdsResult};
pub use error::{EdsError, ErrorKind, Result};
pub use greedy::{GreedySelector, Selection};
pub use inverse::InverseTransformer;
pub use normalize::Standardizer;
pub use svd::{NalgebraSVD, SVDImplementation, SvdParts};
