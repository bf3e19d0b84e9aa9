pub mod analysis;
pub mod gemini;
pub mod random;
pub mod submission;

pub use analysis::{
    AnalysisResult, CannedAnalyzer, ConfiguredAnalyzer, FallbackAnalyzer, ImageAnalyzer,
};
pub use gemini::GeminiAnalyzer;
pub use random::{anonymized_user_id, RandomSource, SequenceRandom, ThreadRandom};
pub use submission::{DataSubmitter, LabelledDataRecord, LoggingSubmitter, SubmissionPayload};
