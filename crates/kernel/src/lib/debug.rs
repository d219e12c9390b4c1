// Kernel debugging utilities

/// Print stack trace (stub: this kernel does not yet walk frame pointers).
pub fn print_stack_trace() {
    crate::kerror!("stack trace printing not implemented");
}

/// Resolve symbol from address (stub)
pub fn resolve_symbol(_addr: u64) -> &'static str {
    "<symbol resolution not implemented>"
}

/// Print CPU state (stub)
pub fn print_cpu_state() {
    crate::kerror!("CPU state dump not implemented");
}
