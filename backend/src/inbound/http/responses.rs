//! Response builders shared by handlers.

use actix_web::HttpResponse;
use actix_web::http::header::{
    CACHE_CONTROL, Charset, ContentDisposition, DispositionParam, DispositionType, ExtendedValue,
};
use serde::Serialize;

use crate::domain::Download;

/// Per-user payloads must be revalidated before reuse.
pub const PRIVATE_NO_CACHE: &str = "private, no-cache, must-revalidate";

/// `200` JSON that shared caches must not store.
pub fn private_json<T: Serialize>(body: &T) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((CACHE_CONTROL, PRIVATE_NO_CACHE))
        .json(body)
}

/// Serve a rendered document as an attachment.
///
/// The filename is sent in the RFC 5987 `filename*` form so non-ASCII
/// quest titles survive.
pub fn attachment(download: Download) -> HttpResponse {
    let disposition = ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::FilenameExt(ExtendedValue {
            charset: Charset::Ext("UTF-8".to_owned()),
            language_tag: None,
            value: download.filename.into_bytes(),
        })],
    };
    HttpResponse::Ok()
        .content_type(download.content_type)
        .insert_header(disposition)
        .insert_header((CACHE_CONTROL, "no-store"))
        .body(download.bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, http::header::CONTENT_DISPOSITION};
    use rstest::rstest;

    #[rstest]
    #[actix_web::test]
    async fn attachment_sets_extended_filename() {
        let res = attachment(Download {
            filename: "statement_Заброшенный_дом.txt".to_owned(),
            content_type: "text/plain; charset=utf-8",
            bytes: b"hello".to_vec(),
        });

        let disposition = res
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .expect("content disposition");
        assert!(disposition.starts_with("attachment; filename*=UTF-8''statement_"));
        assert!(disposition.contains("%D0%97"));
        assert_eq!(
            res.headers().get("content-type").and_then(|v| v.to_str().ok()),
            Some("text/plain; charset=utf-8")
        );
        let body = to_bytes(res.into_body()).await.expect("read body");
        assert_eq!(body.as_ref(), b"hello");
    }

    #[rstest]
    fn private_json_disables_shared_caching() {
        let res = private_json(&serde_json::json!({ "ok": true }));
        assert_eq!(
            res.headers().get(CACHE_CONTROL).and_then(|v| v.to_str().ok()),
            Some(PRIVATE_NO_CACHE)
        );
    }
}
