use crate::domain_port::{StorageTx, TxManager};
use tokio::sync::{Mutex, MutexGuard};

/// Single-writer transactions: a transaction holds the writer lock until
/// committed or dropped. Repo writes are applied eagerly, so callers must check
/// every precondition before the first write.
#[derive(Default)]
pub struct MemoryTxManager {
    writer: Mutex<()>,
}

impl MemoryTxManager {
    pub fn new() -> Self {
        MemoryTxManager {
            writer: Mutex::new(()),
        }
    }
}

#[async_trait::async_trait]
impl TxManager for MemoryTxManager {
    async fn begin<'t>(&'t self) -> anyhow::Result<Box<dyn StorageTx<'t> + 't>> {
        let guard = self.writer.lock().await;
        Ok(Box::new(MemoryTx::new(guard)))
    }
}

pub struct MemoryTx<'t> {
    _guard: MutexGuard<'t, ()>,
}

impl<'t> MemoryTx<'t> {
    pub fn new(guard: MutexGuard<'t, ()>) -> Self {
        MemoryTx { _guard: guard }
    }
}

#[async_trait::async_trait]
impl<'t> StorageTx<'t> for MemoryTx<'t> {
    async fn commit(self: Box<Self>) -> anyhow::Result<()> {
        Ok(())
    }
}
