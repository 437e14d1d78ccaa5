// SPDX-License-Identifier: GPL-3.0-only

//! Residual SRAM reservoir.

use core::mem::MaybeUninit;

use puf_report::PUF_LEN;

/// Raw fingerprint storage. `cortex-m-rt`'s `link.x` places `.uninit.*`
/// input sections in the NOLOAD `.uninit` output section, which the reset
/// handler's copy/zero-fill pass skips, so the cells keep their power-up
/// bias.
///
/// Nothing in the program may write this. A link change that moves it into
/// `.bss` silently destroys the PUF property; there is no runtime check
/// that could detect it.
#[link_section = ".uninit.PUF_SRAM"]
static mut PUF_SRAM: MaybeUninit<[u8; PUF_LEN]> = MaybeUninit::uninit();

/// Copies the reservoir out of SRAM.
///
/// Any bit pattern is a valid `[u8; PUF_LEN]`, so the read is sound.
/// Whether a warm reset (nRST pin, `SYSRESETREQ`) preserves the same bias
/// as a cold power-up is platform dependent and unverified here.
pub(crate) fn fingerprint() -> [u8; PUF_LEN] {
    /* Volatile: the value is supplied by hardware, not by program writes. */
    unsafe { (&raw const PUF_SRAM).read_volatile().assume_init() }
}
