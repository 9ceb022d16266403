pub mod chat_flow;
pub mod flashcard_flow;
pub mod mcq_flow;
pub mod notes_flow;
pub mod report_flow;
pub mod topic_selection;

pub use chat_flow::ChatFlow;
pub use flashcard_flow::FlashcardFlow;
pub use mcq_flow::{McqFlow, McqPhase, McqState};
pub use notes_flow::NotesFlow;
pub use report_flow::ReportFlow;
pub use topic_selection::TopicSelection;
