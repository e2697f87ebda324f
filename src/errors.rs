use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("request to {url} failed: {source}"))]
    TransportError { url: String, source: reqwest::Error },

    #[snafu(display("{url} answered with status {status}"))]
    StatusError { url: String, status: u16 },

    #[snafu(display("request to {url} timed out"))]
    TimeoutError { url: String },

    #[snafu(display("payload is not a list of lap records: {source}"))]
    MalformedPayloadError { source: serde_json::Error },

    #[snafu(display("lap record {index} is malformed: {reason}"))]
    MalformedRecordError { index: usize, reason: String },

    #[snafu(display("unparsable date: {value:?}"))]
    UnparsableDateError { value: String },

    #[snafu(display("invalid {selector} selector: {value:?}"))]
    InvalidSelectorError { selector: &'static str, value: String },

    #[snafu(display("invalid configuration for {key}: {reason}"))]
    ConfigError { key: &'static str, reason: String },

    #[snafu(display("scheduler error: {reason}"))]
    SchedulerError { reason: String },
}

pub type CustomResult<T> = Result<T, Error>;
