#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkStats {
    pub messages_sent: u64,
    pub messages_received: u64,
    pub messages_dropped: u64,
    pub decode_errors: u64,
    pub bytes_sent: u64,
    pub bytes_received: u64,
}
