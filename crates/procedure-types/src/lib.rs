pub mod document;
pub mod error;
pub mod report;
pub mod screenshot;

pub use document::{DocNode, DocumentTree, LocatedNode, NodeKind, StyleValue, ROOT_PATH};
pub use error::MalformedInputError;
pub use report::{ReportSummary, Severity, ValidationFinding, ValidationReport};
pub use screenshot::{
    Position, ProcedureStep, ScreenType, ScreenshotAnalysis, SectionTag, UiElement,
};
