//! Text-to-image capability used by the generator.
//!
//! The diffusion model itself runs out of process. [`HttpDiffusionBackend`]
//! posts each prompt to an inference server and decodes the raster it returns.

use image::DynamicImage;
use serde::Serialize;
use thiserror::Error;

use crate::http_client;

/// Largest image payload accepted from the inference server.
const MAX_IMAGE_BYTES: usize = 64 * 1024 * 1024;

/// Errors raised by an image backend for a single prompt.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request could not be sent or the connection failed.
    #[error("Request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        source: Box<ureq::Error>,
    },
    /// The server answered with a non-success status.
    #[error("{endpoint} answered with HTTP {status}")]
    Status { endpoint: String, status: u16 },
    /// The response body could not be read.
    #[error("Failed to read image from {endpoint}: {source}")]
    Body {
        endpoint: String,
        source: std::io::Error,
    },
    /// The response body was not a decodable image.
    #[error("Invalid image returned by {endpoint}: {source}")]
    Decode {
        endpoint: String,
        source: image::ImageError,
    },
}

/// Produces one raster image per text prompt.
pub trait ImageBackend {
    fn generate(&mut self, prompt: &str) -> Result<DynamicImage, BackendError>;
}

impl<B: ImageBackend + ?Sized> ImageBackend for Box<B> {
    fn generate(&mut self, prompt: &str) -> Result<DynamicImage, BackendError> {
        (**self).generate(prompt)
    }
}

/// Backend that calls a diffusion inference server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDiffusionBackend {
    endpoint: String,
    model_id: String,
    device: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    device: &'a str,
    prompt: &'a str,
}

impl HttpDiffusionBackend {
    pub fn new(
        endpoint: impl Into<String>,
        model_id: impl Into<String>,
        device: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            model_id: model_id.into(),
            device: device.into(),
        }
    }
}

impl ImageBackend for HttpDiffusionBackend {
    fn generate(&mut self, prompt: &str) -> Result<DynamicImage, BackendError> {
        let request = GenerateRequest {
            model: &self.model_id,
            device: &self.device,
            prompt,
        };
        tracing::debug!("Requesting image from {} for {prompt:?}", self.endpoint);
        let response = http_client::agent()
            .post(&self.endpoint)
            .set("Accept", "image/png")
            .send_json(&request)
            .map_err(|err| match err {
                ureq::Error::Status(status, _) => BackendError::Status {
                    endpoint: self.endpoint.clone(),
                    status,
                },
                other => BackendError::Http {
                    endpoint: self.endpoint.clone(),
                    source: Box::new(other),
                },
            })?;
        let bytes = http_client::read_capped(response, MAX_IMAGE_BYTES).map_err(
            |source| BackendError::Body {
                endpoint: self.endpoint.clone(),
                source,
            },
        )?;
        image::load_from_memory(&bytes).map_err(|source| BackendError::Decode {
            endpoint: self.endpoint.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::test_server::serve_once;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let img = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    fn ok_response(body: &[u8]) -> Vec<u8> {
        let mut response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: {}\r\n\r\n",
            body.len()
        )
        .into_bytes();
        response.extend_from_slice(body);
        response
    }

    #[test]
    fn posts_prompt_with_model_and_device() {
        let (url, requests) = serve_once(ok_response(&png_bytes()));
        let mut backend = HttpDiffusionBackend::new(
            format!("{url}/generate"),
            "stabilityai/sdxl-turbo",
            "cpu",
        );
        let image = backend.generate("A gothic cathedral").unwrap();
        assert_eq!((image.width(), image.height()), (3, 2));

        let request = requests.recv().unwrap();
        assert!(request.starts_with("POST /generate"));
        let body = request.split_once("\r\n\r\n").unwrap().1;
        let json: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(json["model"], "stabilityai/sdxl-turbo");
        assert_eq!(json["device"], "cpu");
        assert_eq!(json["prompt"], "A gothic cathedral");
    }

    #[test]
    fn error_status_is_reported() {
        let (url, _) = serve_once(
            b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\n\r\n".to_vec(),
        );
        let mut backend = HttpDiffusionBackend::new(url, "m", "cpu");
        let err = backend.generate("prompt").unwrap_err();
        assert!(matches!(err, BackendError::Status { status: 503, .. }));
    }

    #[test]
    fn non_image_body_fails_to_decode() {
        let (url, _) = serve_once(ok_response(b"not an image"));
        let mut backend = HttpDiffusionBackend::new(url, "m", "cpu");
        let err = backend.generate("prompt").unwrap_err();
        assert!(matches!(err, BackendError::Decode { .. }));
    }
}
