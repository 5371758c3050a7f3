//! The marketplaces rolba knows how to read.

mod black_vinyl_bazar;
mod vinyl_empire;

pub use self::black_vinyl_bazar::BlackVinylBazar;
pub use self::vinyl_empire::VinylEmpire;
