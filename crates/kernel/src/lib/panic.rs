//! Panic handler: prints a diagnostic dump over the serial console and
//! halts. There is no userspace to return to and no supervisor to restart
//! the kernel, so a panic is always fatal.

use core::panic::PanicInfo;
use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::arch::x86_64::serial::serial_write;

static PANICKING: AtomicBool = AtomicBool::new(false);
static PANIC_COUNT: AtomicU64 = AtomicU64::new(0);

pub fn panic_handler(info: &PanicInfo) -> ! {
    if PANICKING.swap(true, Ordering::SeqCst) {
        serial_write(b"\n!!! RECURSIVE PANIC !!!\n");
        halt();
    }

    let panic_num = PANIC_COUNT.fetch_add(1, Ordering::SeqCst) + 1;
    disable_interrupts();

    print_panic_header(panic_num);
    print_panic_info(info);
    print_registers();
    print_system_state();

    halt();
}

fn print_panic_header(panic_num: u64) {
    serial_write(b"\n================================================================================\n");
    serial_write(b"!!!                            KERNEL PANIC                                  !!!\n");
    serial_write(b"================================================================================\n");
    if panic_num > 1 {
        let msg = alloc::format!("Panic #{}\n", panic_num);
        serial_write(msg.as_bytes());
    }
    serial_write(b"\n");
}

fn print_panic_info(info: &PanicInfo) {
    serial_write(b"PANIC INFORMATION:\n------------------\n");

    if let Some(location) = info.location() {
        let loc = alloc::format!("  Location: {}:{}:{}\n", location.file(), location.line(), location.column());
        serial_write(loc.as_bytes());
    } else {
        serial_write(b"  Location: <unknown>\n");
    }

    if let Some(payload) = info.payload().downcast_ref::<&str>() {
        let msg = alloc::format!("  Message:  {}\n", payload);
        serial_write(msg.as_bytes());
    } else if let Some(payload) = info.payload().downcast_ref::<alloc::string::String>() {
        let msg = alloc::format!("  Message:  {}\n", payload);
        serial_write(msg.as_bytes());
    } else {
        serial_write(b"  Message:  <no message>\n");
    }
    serial_write(b"\n");
}

fn print_registers() {
    serial_write(b"REGISTER DUMP:\n--------------\n");

    use core::arch::asm;
    let (rax, rbx, rcx, rdx): (u64, u64, u64, u64);
    let (rsi, rdi, rbp, rsp): (u64, u64, u64, u64);
    let (r8, r9, r10, r11): (u64, u64, u64, u64);
    let (r12, r13, r14, r15): (u64, u64, u64, u64);
    unsafe {
        asm!("mov {}, rax", out(reg) rax);
        asm!("mov {}, rbx", out(reg) rbx);
        asm!("mov {}, rcx", out(reg) rcx);
        asm!("mov {}, rdx", out(reg) rdx);
        asm!("mov {}, rsi", out(reg) rsi);
        asm!("mov {}, rdi", out(reg) rdi);
        asm!("mov {}, rbp", out(reg) rbp);
        asm!("mov {}, rsp", out(reg) rsp);
        asm!("mov {}, r8", out(reg) r8);
        asm!("mov {}, r9", out(reg) r9);
        asm!("mov {}, r10", out(reg) r10);
        asm!("mov {}, r11", out(reg) r11);
        asm!("mov {}, r12", out(reg) r12);
        asm!("mov {}, r13", out(reg) r13);
        asm!("mov {}, r14", out(reg) r14);
        asm!("mov {}, r15", out(reg) r15);
    }

    let regs = alloc::format!(
        "  rax: {:016x}  rbx: {:016x}  rcx: {:016x}  rdx: {:016x}\n\
         rsi: {:016x}  rdi: {:016x}  rbp: {:016x}  rsp: {:016x}\n\
         r8:  {:016x}  r9:  {:016x}  r10: {:016x}  r11: {:016x}\n\
         r12: {:016x}  r13: {:016x}  r14: {:016x}  r15: {:016x}\n",
        rax, rbx, rcx, rdx, rsi, rdi, rbp, rsp, r8, r9, r10, r11, r12, r13, r14, r15
    );
    serial_write(regs.as_bytes());
    serial_write(b"\n");
}

fn print_system_state() {
    serial_write(b"SYSTEM STATE:\n-------------\n");

    let stats = crate::mm::heap::stats();
    let msg = alloc::format!(
        "  Heap: {} bytes current, {} bytes peak, {} allocs, {} deallocs, {} failures\n",
        stats.current_allocated, stats.peak_allocated, stats.total_allocations,
        stats.total_deallocations, stats.allocation_failures
    );
    serial_write(msg.as_bytes());

    let version = crate::build_info::get_version_string();
    let msg = alloc::format!("  Version: {}\n", version);
    serial_write(msg.as_bytes());
    serial_write(b"\n");
}

#[inline(always)]
fn disable_interrupts() {
    unsafe {
        core::arch::asm!("cli");
    }
}

#[inline(always)]
fn halt() -> ! {
    serial_write(b"================================================================================\n");
    serial_write(b"System halted.\n");
    serial_write(b"================================================================================\n");
    loop {
        unsafe {
            core::arch::asm!("hlt");
        }
    }
}

pub fn get_panic_count() -> u64 {
    PANIC_COUNT.load(Ordering::Relaxed)
}

pub fn is_panicking() -> bool {
    PANICKING.load(Ordering::Relaxed)
}
