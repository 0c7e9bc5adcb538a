pub mod prelude;

pub mod games;
