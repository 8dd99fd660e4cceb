use futures::{
    executor::LocalSpawner,
    future::LocalBoxFuture,
    task::LocalSpawnExt,
};
use tracing::warn;

/// Runs background work on the page's single event thread.
pub trait Spawn {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);
}

impl Spawn for LocalSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        if let Err(error) = LocalSpawnExt::spawn_local(self, task) {
            warn!(%error, "local executor is shut down; dropping task");
        }
    }
}
