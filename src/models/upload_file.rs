use crate::models::FileDescriptor;
use bytes::Bytes;

/// A file queued for upload: descriptor plus content.
///
/// The descriptor's `size` is always derived from the content, so the two
/// cannot drift apart.
///
/// ```rust
/// use strata_link::UploadFile;
///
/// let file = UploadFile::new("report.pdf", "pdf", b"%PDF-1.7".as_slice());
/// assert_eq!(file.descriptor().size, 8);
/// ```
#[derive(Debug, Clone)]
pub struct UploadFile {
    descriptor: FileDescriptor,
    contents: Bytes,
}

impl UploadFile {
    /// Create an upload file from a name, a declared MIME type, and content.
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        contents: impl Into<Bytes>,
    ) -> Self {
        let contents = contents.into();
        Self {
            descriptor: FileDescriptor {
                name: name.into(),
                content_type: content_type.into(),
                size: contents.len() as u64,
            },
            contents,
        }
    }

    /// The file's descriptor.
    pub fn descriptor(&self) -> &FileDescriptor {
        &self.descriptor
    }

    /// The file's name.
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// The file's content.
    pub fn contents(&self) -> &Bytes {
        &self.contents
    }

    /// Split into descriptor and content.
    pub(crate) fn into_parts(self) -> (FileDescriptor, Bytes) {
        (self.descriptor, self.contents)
    }
}
