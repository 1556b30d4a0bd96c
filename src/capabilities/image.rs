use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// A media locator the image pipeline will accept: parseable, http(s), with a
/// host. Anything else is rejected before a load is ever dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaUrl(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaUrlError {
    #[error("media url is not parseable: {reason}")]
    Unparseable { reason: String },
    #[error("media url has unsupported scheme '{scheme}'")]
    UnsupportedScheme { scheme: String },
    #[error("media url has no host")]
    MissingHost,
}

impl MediaUrl {
    pub fn parse(raw: &str) -> Result<Self, MediaUrlError> {
        let parsed = Url::parse(raw).map_err(|e| MediaUrlError::Unparseable {
            reason: e.to_string(),
        })?;

        let scheme = parsed.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(MediaUrlError::UnsupportedScheme {
                scheme: scheme.to_string(),
            });
        }

        if parsed.host_str().is_none() {
            return Err(MediaUrlError::MissingHost);
        }

        Ok(Self(parsed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Load request for the shell's image pipeline (Glide or equivalent). The
/// pipeline owns decoding and caching; the core only learns whether the media
/// ended up drawable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageOperation {
    Load { url: MediaUrl },
}

/// Terminal outcome of one image load. Deliberately two-valued: the screen
/// collapses all pipeline failures into a single error panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageOutcome {
    Ready,
    Failed,
}

impl Operation for ImageOperation {
    type Output = ImageOutcome;
}

pub struct ImageLoader<Ev> {
    context: CapabilityContext<ImageOperation, Ev>,
}

impl<Ev> Capability<Ev> for ImageLoader<Ev> {
    type Operation = ImageOperation;
    type MappedSelf<MappedEv> = ImageLoader<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static,
    {
        ImageLoader::new(self.context.map_event(f))
    }
}

impl<Ev> ImageLoader<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<ImageOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn load<F>(&self, url: MediaUrl, make_event: F)
    where
        F: Fn(ImageOutcome) -> Ev + Send + Sync + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let outcome = context
                .request_from_shell(ImageOperation::Load { url })
                .await;
            context.update_app(make_event(outcome));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(MediaUrl::parse("https://cdn.example.com/a.gif").is_ok());
        assert!(MediaUrl::parse("http://cdn.example.com/a.gif").is_ok());
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(matches!(
            MediaUrl::parse("ftp://cdn.example.com/a.gif"),
            Err(MediaUrlError::UnsupportedScheme { .. })
        ));
        assert!(matches!(
            MediaUrl::parse("javascript:alert(1)"),
            Err(MediaUrlError::UnsupportedScheme { .. })
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            MediaUrl::parse("not a url"),
            Err(MediaUrlError::Unparseable { .. })
        ));
    }
}
