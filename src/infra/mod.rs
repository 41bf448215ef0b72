//! Инфраструктурный слой вокруг движка стола:
//! - RNG-реализации для перемешивания колоды;
//! - стратегия-обёртка с жёстким таймаутом решения.

pub mod rng;
pub mod threaded;

pub use rng::*;
pub use threaded::ThreadedStrategy;
