mod handler_factory;
mod presenter_factory;

pub use handler_factory::HandlerFactory;
pub use presenter_factory::{PresenterFactory, PresenterType};
