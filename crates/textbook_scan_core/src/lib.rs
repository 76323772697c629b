pub mod actions;
pub mod domain;
pub mod error;
pub mod inputs;
pub mod memory;
pub mod ports;

pub use domain::{
    AuthContext, Document, DocumentWithPages, Highlight, HighlightType, JobStatus, JobType, Page,
    ScanJob, SourceType,
};
pub use error::{ActionError, ActionResult};
pub use memory::InMemoryDatabase;
pub use ports::{DatabaseService, PortError, PortResult};
