/// unwrap a result in a route, turning the error into a http status.
/// bad selectors become a 400, dates that can not be sorted a 422.
macro_rules! handle_error_http {
    ( $data:expr, $target:expr ) => {
        match $data {
            Ok(e) => e,
            Err(error @ $crate::errors::Error::InvalidSelectorError { .. }) => {
                warn!(target: $target, "{}", error);
                return Err(Status::BadRequest);
            }
            Err(error @ $crate::errors::Error::UnparsableDateError { .. }) => {
                warn!(target: $target, "{}", error);
                return Err(Status::UnprocessableEntity);
            }
            Err(error) => {
                error!(target: $target, "{}", error);
                return Err(Status::InternalServerError);
            }
        }
    }
}

pub(crate) use handle_error_http;
