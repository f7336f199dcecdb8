pub mod plan;
pub mod resource;
pub mod student;
pub mod subject;
pub mod summary;

pub use plan::{NewPlan, PlanEntry, PlanKind};
pub use resource::{Resource, ResourceKind};
pub use student::{Student, StudentMarks};
pub use subject::{Components, SubjectRecord};
pub use summary::Summary;
