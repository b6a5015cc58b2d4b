use bplus_index::{BPlusTreeMap, NameHasher, DEFAULT_ORDER};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const NAMES: [&str; 7] = ["Зайченко", "Заєць", "Курча", "Андрій", "Іван", "Ігор", "Оксана"];

// Builds a name index and logs lookups around "Заєць" and a deletion of "Іван".
// Order comes from the first argument, then NAME_INDEX_ORDER, then the default.
fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "name_index_demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let order: usize = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("NAME_INDEX_ORDER").ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_ORDER);

    let mut tree = match BPlusTreeMap::new(order) {
        Ok(tree) => tree,
        Err(e) => {
            tracing::error!("Failed to create index: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(order, "building name index");

    let hasher = NameHasher::new();
    for name in NAMES {
        let key = hasher.hash_name(name);
        tracing::debug!(name, key, "insert");
        tree.insert(key, name);
    }

    let hare = hasher.hash_name("Заєць");
    tracing::info!("search Заєць: {:?}", tree.search(&hare));
    tracing::info!("names greater than Заєць: {:?}", tree.search_greater(&hare));
    tracing::info!("names less than Заєць: {:?}", tree.search_less(&hare));

    let ivan = hasher.hash_name("Іван");
    tracing::info!("before deleting Іван: {:?}", tree.search(&ivan));
    let deleted = tree.delete(&ivan);
    tracing::info!(deleted, "after deleting Іван: {:?}", tree.search(&ivan));
    tracing::info!("names greater than Іван: {:?}", tree.search_greater(&ivan));

    if let Err(e) = tree.validate() {
        tracing::error!("index failed validation: {e}");
        std::process::exit(1);
    }
}
