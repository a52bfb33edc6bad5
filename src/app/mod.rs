// Application layer - Use case interactors

pub mod batch_interactor;
pub mod container;
pub mod inspect_interactor;
pub mod trim_interactor;

// Re-export interactors
pub use batch_interactor::{BatchInteractor, BatchRequest};
pub use container::{AppContainer, DefaultAppContainer};
pub use inspect_interactor::{InspectInteractor, InspectReport, InspectRequest, PlannedAction};
pub use trim_interactor::TrimInteractor;
