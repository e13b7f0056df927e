use bytes::Bytes;

/// Anything the UI layer hands us as an uploaded file.
pub trait UploadedFile {
    fn name(&self) -> &str;
    fn read_bytes(&self) -> Bytes;
}

/// An upload fully buffered in memory (multipart fields, test fixtures).
#[derive(Debug, Clone)]
pub struct InMemoryUpload {
    name: String,
    bytes: Bytes,
}

impl InMemoryUpload {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

impl UploadedFile for InMemoryUpload {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_bytes(&self) -> Bytes {
        self.bytes.clone()
    }
}
