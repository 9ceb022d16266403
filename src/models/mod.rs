pub mod ai_model;
pub mod chat;
pub mod document;
pub mod flashcard;
pub mod mcq;
pub mod report;
pub mod topics;

pub use ai_model::{AiModel, Page};
pub use chat::{AskResponse, ChatMessage, ChatTranscript, Role, UploadResponse};
pub use document::Document;
pub use flashcard::{Flashcard, FlashcardResponse};
pub use mcq::{GenerateMcqRequest, Mcq};
pub use report::{StudentInfo, StudentReport, SubjectPerformance, Weakness};
pub use topics::{ExtractedTopics, TopicHierarchy};
