//! One ureq agent for the whole process, plus size-capped body reads.

use std::{
    io::{self, Read},
    sync::LazyLock,
    time::Duration,
};

// A CPU device can spend minutes on a single image.
const READ_TIMEOUT: Duration = Duration::from_secs(900);

static AGENT: LazyLock<ureq::Agent> = LazyLock::new(|| {
    ureq::AgentBuilder::new()
        .timeout_connect(Duration::from_secs(10))
        .timeout_write(Duration::from_secs(30))
        .timeout_read(READ_TIMEOUT)
        .build()
});

pub(crate) fn agent() -> &'static ureq::Agent {
    &AGENT
}

/// Buffer the response body, failing once it would exceed `limit` bytes.
///
/// A declared `Content-Length` over the limit fails before anything is read.
pub(crate) fn read_capped(response: ureq::Response, limit: usize) -> io::Result<Vec<u8>> {
    let declared = response
        .header("Content-Length")
        .and_then(|value| value.trim().parse::<u64>().ok());
    if let Some(declared) = declared.filter(|&len| len > limit as u64) {
        return Err(too_large(format!(
            "server announced {declared} bytes, limit is {limit}"
        )));
    }
    let mut body = Vec::with_capacity(declared.unwrap_or(0).min(limit as u64) as usize);
    response
        .into_reader()
        .take(limit as u64 + 1)
        .read_to_end(&mut body)?;
    if body.len() > limit {
        return Err(too_large(format!("body is larger than {limit} bytes")));
    }
    Ok(body)
}

fn too_large(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}
