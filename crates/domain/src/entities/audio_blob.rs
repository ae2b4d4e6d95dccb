//! Synthesized speech ready to upload

/// In-memory audio plus the metadata needed to upload it
#[derive(Clone, PartialEq, Eq)]
pub struct AudioBlob {
    /// Encoded audio bytes, starting at offset zero
    pub data: Vec<u8>,
    /// MIME type such as `audio/mpeg`
    pub mime_type: String,
    /// Upload filename
    pub filename: String,
    /// Track title shown by the chat client
    pub title: Option<String>,
}

impl AudioBlob {
    /// Create a new blob
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
            filename: filename.into(),
            title: None,
        }
    }

    /// Set the track title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the blob holds no audio
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl std::fmt::Debug for AudioBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioBlob")
            .field("bytes", &self.data.len())
            .field("mime_type", &self.mime_type)
            .field("filename", &self.filename)
            .field("title", &self.title)
            .finish()
    }
}
