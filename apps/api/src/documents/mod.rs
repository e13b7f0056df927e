// Upload decoding: resumes (.docx / .pdf) and job descriptions (UTF-8 text).

pub mod docx;
pub mod extract;
pub mod upload;

pub use extract::{decode_job_description, extract_resume_text, DocumentError};
pub use upload::{InMemoryUpload, UploadedFile};
