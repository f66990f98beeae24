//! Blocking HTTP implementation of [`SequencerClient`].

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use url::Url;

use crate::address::Address;
use crate::codec;
use crate::dispatch::{Output, RollupRequest, Verdict};

use super::errors::SequencerError;
use super::{Poll, SEQUENCER_TARGET, SequencerClient};

const FINISH: &str = "finish";

#[derive(Serialize)]
struct FinishBody {
    status: Verdict,
}

#[derive(Serialize)]
struct OutputBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    destination: Option<Address>,
    payload: String,
}

impl From<&Output> for OutputBody {
    fn from(output: &Output) -> Self {
        Self {
            destination: output.destination().copied(),
            payload: codec::encode_hex(output.payload()),
        }
    }
}

#[derive(Deserialize)]
struct IndexBody {
    index: u64,
}

/// Sequencer reached over HTTP.
///
/// `/finish` blocks until the sequencer has work, so it is sent without a
/// timeout. Output submissions use `submit_timeout`. The sequencer runs next
/// to the application, so proxy settings from the environment are ignored.
#[derive(Debug, Clone)]
pub struct HttpSequencer {
    client: Client,
    base: String,
    submit_timeout: Duration,
}

impl HttpSequencer {
    /// Creates a client for the sequencer rooted at `base`.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::Client`] when the HTTP client cannot be
    /// initialised.
    pub fn new(base: &Url, submit_timeout: Duration) -> Result<Self, SequencerError> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .no_proxy()
            .build()
            .map_err(|source| SequencerError::Client { source })?;
        Ok(Self {
            client,
            base: base.as_str().trim_end_matches('/').to_owned(),
            submit_timeout,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base)
    }
}

impl SequencerClient for HttpSequencer {
    fn poll_next(&self, status: Verdict) -> Result<Poll, SequencerError> {
        let url = self.endpoint(FINISH);
        trace!(target: SEQUENCER_TARGET, %status, "sending finish");
        let response = self
            .client
            .post(&url)
            .json(&FinishBody { status })
            .send()
            .map_err(|source| SequencerError::transport(FINISH, source))?;

        match response.status() {
            StatusCode::ACCEPTED => Ok(Poll::Empty),
            StatusCode::OK => {
                let body = response
                    .bytes()
                    .map_err(|source| SequencerError::transport(FINISH, source))?;
                let request = RollupRequest::parse(&body)
                    .map_err(|source| SequencerError::Envelope { source })?;
                debug!(target: SEQUENCER_TARGET, kind = %request.kind(), "received request");
                Ok(Poll::Request(request))
            }
            other => Err(SequencerError::unexpected_status(
                FINISH,
                other.as_u16(),
                response.text().unwrap_or_default(),
            )),
        }
    }

    fn submit(&self, output: &Output) -> Result<Option<u64>, SequencerError> {
        let kind = output.kind();
        let url = self.endpoint(kind.as_str());
        let response = self
            .client
            .post(&url)
            .timeout(self.submit_timeout)
            .json(&OutputBody::from(output))
            .send()
            .map_err(|source| SequencerError::transport(kind.as_str(), source))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SequencerError::unexpected_status(
                kind.as_str(),
                status.as_u16(),
                response.text().unwrap_or_default(),
            ));
        }
        let index = response.json::<IndexBody>().ok().map(|body| body.index);
        trace!(target: SEQUENCER_TARGET, %kind, ?index, "output accepted");
        Ok(index)
    }
}
