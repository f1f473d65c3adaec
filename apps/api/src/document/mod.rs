//! Document text extraction: uploaded bytes in, plain text out.
//!
//! PDFs go through `pdf-extract` on a blocking thread; plain-text uploads are
//! decoded as UTF-8. Nothing here knows about profiles.

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

const PDF_MAGIC: &[u8] = b"%PDF";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("not a PDF document")]
    NotAPdf,

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("PDF extraction aborted: {0}")]
    Aborted(String),
}

/// How an uploaded part is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Picks a kind from the part's content type and file name.
    /// Anything not recognisably text is treated as a PDF.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Self {
        let content_type = content_type.map(str::to_ascii_lowercase);
        let file_name = file_name.map(str::to_ascii_lowercase);

        if content_type.as_deref() == Some("application/pdf")
            || file_name.as_deref().is_some_and(|n| n.ends_with(".pdf"))
        {
            return DocumentKind::Pdf;
        }
        if content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("text/plain"))
            || file_name.as_deref().is_some_and(|n| n.ends_with(".txt"))
        {
            return DocumentKind::PlainText;
        }
        DocumentKind::Pdf
    }
}

/// Extracts the text layer of a document.
pub async fn extract_text(bytes: Bytes, kind: DocumentKind) -> Result<String, DocumentError> {
    let text = match kind {
        DocumentKind::PlainText => String::from_utf8_lossy(&bytes).into_owned(),
        DocumentKind::Pdf => {
            if !bytes.starts_with(PDF_MAGIC) {
                return Err(DocumentError::NotAPdf);
            }
            // pdf-extract is CPU bound and panics on some malformed inputs;
            // a panic surfaces here as a JoinError.
            tokio::task::spawn_blocking(move || {
                pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
            })
            .await
            .map_err(|e| DocumentError::Aborted(e.to_string()))?
            .map_err(DocumentError::Pdf)?
        }
    };

    debug!("Extracted {} chars from {:?} document", text.chars().count(), kind);
    Ok(text)
}
