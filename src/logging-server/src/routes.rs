use std::sync::{Arc, LazyLock};

use axum::routing::{get, MethodRouter};
use logging_sentry::Application;

use crate::handlers::error::{error, ERROR_ENDPOINT};
use crate::handlers::index::{index, INDEX_ENDPOINT};

pub(super) static ROUTES: LazyLock<Vec<(&'static str, MethodRouter<Arc<Application>>)>> =
    LazyLock::new(|| vec![(INDEX_ENDPOINT, get(index)), (ERROR_ENDPOINT, get(error))]);
