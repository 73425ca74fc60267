use std::sync::Arc;

use crate::codec::Decoder;

pub(crate) struct ApiServerState {
    pub(crate) decoder: Arc<dyn Decoder>,
}
