//! Process record produced by one refresh cycle

/// A process as seen at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: u32,
    pub name: String,
    /// Resident memory in bytes, never zero once indexed
    pub memory_bytes: u64,
}

impl ProcessRecord {
    pub fn new(pid: u32, name: impl Into<String>, memory_bytes: u64) -> Self {
        Self {
            pid,
            name: name.into(),
            memory_bytes,
        }
    }

    /// Ordering key: memory first, PID breaks ties.
    pub fn key(&self) -> (u64, u32) {
        (self.memory_bytes, self.pid)
    }

    pub fn memory_kb(&self) -> u64 {
        self.memory_bytes / 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_kb_truncates() {
        let record = ProcessRecord::new(1, "init", 1024 * 10 + 1023);
        assert_eq!(record.memory_kb(), 10);
        assert_eq!(ProcessRecord::new(2, "tiny", 512).memory_kb(), 0);
    }

    #[test]
    fn test_key_orders_by_memory_then_pid() {
        let a = ProcessRecord::new(10, "a", 500);
        let b = ProcessRecord::new(5, "b", 500);
        let c = ProcessRecord::new(1, "c", 1000);
        assert!(b.key() < a.key());
        assert!(a.key() < c.key());
    }
}
