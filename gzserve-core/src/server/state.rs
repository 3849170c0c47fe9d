use crate::assets::AssetIndex;
use crate::conf::RuntimeConfig;
use crate::intercept::Interceptor;
use crate::static_files::StaticSite;

/// Everything a request needs, built once before the listener opens.
#[derive(Debug)]
pub struct RuntimeState {
    pub interceptor: Interceptor,
    pub site: StaticSite,
}

pub fn build_runtime_state(config: &RuntimeConfig) -> RuntimeState {
    let assets = &config.assets;

    tracing::info!(
        encodings = ?assets.encodings.names(),
        root = %assets.root.display(),
        mount = %assets.mount,
        "registered encodings"
    );

    let index = AssetIndex::build(&assets.root, &assets.encodings);
    tracing::info!(assets = index.len(), "pre-compressed asset index built");

    RuntimeState {
        interceptor: Interceptor::new(
            index,
            assets.index_file.clone(),
            assets.order_preference.clone(),
        ),
        site: StaticSite {
            root: assets.root.clone(),
            mount: assets.mount.clone(),
            options: assets.serve.clone(),
        },
    }
}
