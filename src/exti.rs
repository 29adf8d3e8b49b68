// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! External interrupt controller (EXTI).
//!
//! [`Exti`] owns the EXTI register bank and coordinates the surrounding
//! blocks: SYSCFG routes a GPIO port onto each line and the NVIC gates the
//! line's interrupt request into the core. Lines 0-4 have dedicated
//! requests; lines 5-9 and 10-15 are funneled onto the shared EXTI9_5 and
//! EXTI15_10 requests, so a handler for those must consult the pending
//! register to find the source line.

use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};
use tock_registers::register_bitfields;
use tock_registers::registers::ReadWrite;

use crate::gpio::PortId;
use crate::nvic;
use crate::nvic::Nvic;
use crate::static_ref::StaticRef;
use crate::syscfg::Syscfg;

/// External interrupt/event controller
#[repr(C)]
pub struct ExtiRegisters {
    /// interrupt mask register
    imr: ReadWrite<u32, IMR::Register>,
    /// event mask register
    emr: ReadWrite<u32, EMR::Register>,
    /// rising trigger selection register
    rtsr: ReadWrite<u32, RTSR::Register>,
    /// falling trigger selection register
    ftsr: ReadWrite<u32, FTSR::Register>,
    /// software interrupt event register
    swier: ReadWrite<u32, SWIER::Register>,
    /// pending register, write 1 to clear
    pr: ReadWrite<u32, PR::Register>,
}

register_bitfields![u32,
    IMR [
        MR0 OFFSET(0) NUMBITS(1) [],
        MR1 OFFSET(1) NUMBITS(1) [],
        MR2 OFFSET(2) NUMBITS(1) [],
        MR3 OFFSET(3) NUMBITS(1) [],
        MR4 OFFSET(4) NUMBITS(1) [],
        MR5 OFFSET(5) NUMBITS(1) [],
        MR6 OFFSET(6) NUMBITS(1) [],
        MR7 OFFSET(7) NUMBITS(1) [],
        MR8 OFFSET(8) NUMBITS(1) [],
        MR9 OFFSET(9) NUMBITS(1) [],
        MR10 OFFSET(10) NUMBITS(1) [],
        MR11 OFFSET(11) NUMBITS(1) [],
        MR12 OFFSET(12) NUMBITS(1) [],
        MR13 OFFSET(13) NUMBITS(1) [],
        MR14 OFFSET(14) NUMBITS(1) [],
        MR15 OFFSET(15) NUMBITS(1) []
    ],
    EMR [
        MR0 OFFSET(0) NUMBITS(1) [],
        MR1 OFFSET(1) NUMBITS(1) [],
        MR2 OFFSET(2) NUMBITS(1) [],
        MR3 OFFSET(3) NUMBITS(1) [],
        MR4 OFFSET(4) NUMBITS(1) [],
        MR5 OFFSET(5) NUMBITS(1) [],
        MR6 OFFSET(6) NUMBITS(1) [],
        MR7 OFFSET(7) NUMBITS(1) [],
        MR8 OFFSET(8) NUMBITS(1) [],
        MR9 OFFSET(9) NUMBITS(1) [],
        MR10 OFFSET(10) NUMBITS(1) [],
        MR11 OFFSET(11) NUMBITS(1) [],
        MR12 OFFSET(12) NUMBITS(1) [],
        MR13 OFFSET(13) NUMBITS(1) [],
        MR14 OFFSET(14) NUMBITS(1) [],
        MR15 OFFSET(15) NUMBITS(1) []
    ],
    RTSR [
        TR0 OFFSET(0) NUMBITS(1) [],
        TR1 OFFSET(1) NUMBITS(1) [],
        TR2 OFFSET(2) NUMBITS(1) [],
        TR3 OFFSET(3) NUMBITS(1) [],
        TR4 OFFSET(4) NUMBITS(1) [],
        TR5 OFFSET(5) NUMBITS(1) [],
        TR6 OFFSET(6) NUMBITS(1) [],
        TR7 OFFSET(7) NUMBITS(1) [],
        TR8 OFFSET(8) NUMBITS(1) [],
        TR9 OFFSET(9) NUMBITS(1) [],
        TR10 OFFSET(10) NUMBITS(1) [],
        TR11 OFFSET(11) NUMBITS(1) [],
        TR12 OFFSET(12) NUMBITS(1) [],
        TR13 OFFSET(13) NUMBITS(1) [],
        TR14 OFFSET(14) NUMBITS(1) [],
        TR15 OFFSET(15) NUMBITS(1) []
    ],
    FTSR [
        TR0 OFFSET(0) NUMBITS(1) [],
        TR1 OFFSET(1) NUMBITS(1) [],
        TR2 OFFSET(2) NUMBITS(1) [],
        TR3 OFFSET(3) NUMBITS(1) [],
        TR4 OFFSET(4) NUMBITS(1) [],
        TR5 OFFSET(5) NUMBITS(1) [],
        TR6 OFFSET(6) NUMBITS(1) [],
        TR7 OFFSET(7) NUMBITS(1) [],
        TR8 OFFSET(8) NUMBITS(1) [],
        TR9 OFFSET(9) NUMBITS(1) [],
        TR10 OFFSET(10) NUMBITS(1) [],
        TR11 OFFSET(11) NUMBITS(1) [],
        TR12 OFFSET(12) NUMBITS(1) [],
        TR13 OFFSET(13) NUMBITS(1) [],
        TR14 OFFSET(14) NUMBITS(1) [],
        TR15 OFFSET(15) NUMBITS(1) []
    ],
    SWIER [
        SWIER0 OFFSET(0) NUMBITS(1) [],
        SWIER1 OFFSET(1) NUMBITS(1) [],
        SWIER2 OFFSET(2) NUMBITS(1) [],
        SWIER3 OFFSET(3) NUMBITS(1) [],
        SWIER4 OFFSET(4) NUMBITS(1) [],
        SWIER5 OFFSET(5) NUMBITS(1) [],
        SWIER6 OFFSET(6) NUMBITS(1) [],
        SWIER7 OFFSET(7) NUMBITS(1) [],
        SWIER8 OFFSET(8) NUMBITS(1) [],
        SWIER9 OFFSET(9) NUMBITS(1) [],
        SWIER10 OFFSET(10) NUMBITS(1) [],
        SWIER11 OFFSET(11) NUMBITS(1) [],
        SWIER12 OFFSET(12) NUMBITS(1) [],
        SWIER13 OFFSET(13) NUMBITS(1) [],
        SWIER14 OFFSET(14) NUMBITS(1) [],
        SWIER15 OFFSET(15) NUMBITS(1) []
    ],
    PR [
        PR0 OFFSET(0) NUMBITS(1) [],
        PR1 OFFSET(1) NUMBITS(1) [],
        PR2 OFFSET(2) NUMBITS(1) [],
        PR3 OFFSET(3) NUMBITS(1) [],
        PR4 OFFSET(4) NUMBITS(1) [],
        PR5 OFFSET(5) NUMBITS(1) [],
        PR6 OFFSET(6) NUMBITS(1) [],
        PR7 OFFSET(7) NUMBITS(1) [],
        PR8 OFFSET(8) NUMBITS(1) [],
        PR9 OFFSET(9) NUMBITS(1) [],
        PR10 OFFSET(10) NUMBITS(1) [],
        PR11 OFFSET(11) NUMBITS(1) [],
        PR12 OFFSET(12) NUMBITS(1) [],
        PR13 OFFSET(13) NUMBITS(1) [],
        PR14 OFFSET(14) NUMBITS(1) [],
        PR15 OFFSET(15) NUMBITS(1) []
    ]
];

pub const EXTI_BASE: StaticRef<ExtiRegisters> =
    unsafe { StaticRef::new(0x4001_3C00 as *const ExtiRegisters) };

/// External interrupt line. Line `n` serves pin `n` of whichever port
/// SYSCFG routes onto it.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineId {
    Exti0 = 0,
    Exti1 = 1,
    Exti2 = 2,
    Exti3 = 3,
    Exti4 = 4,
    Exti5 = 5,
    Exti6 = 6,
    Exti7 = 7,
    Exti8 = 8,
    Exti9 = 9,
    Exti10 = 10,
    Exti11 = 11,
    Exti12 = 12,
    Exti13 = 13,
    Exti14 = 14,
    Exti15 = 15,
}

impl LineId {
    pub fn from_pin(pin: u8) -> Option<LineId> {
        match pin {
            0 => Some(LineId::Exti0),
            1 => Some(LineId::Exti1),
            2 => Some(LineId::Exti2),
            3 => Some(LineId::Exti3),
            4 => Some(LineId::Exti4),
            5 => Some(LineId::Exti5),
            6 => Some(LineId::Exti6),
            7 => Some(LineId::Exti7),
            8 => Some(LineId::Exti8),
            9 => Some(LineId::Exti9),
            10 => Some(LineId::Exti10),
            11 => Some(LineId::Exti11),
            12 => Some(LineId::Exti12),
            13 => Some(LineId::Exti13),
            14 => Some(LineId::Exti14),
            15 => Some(LineId::Exti15),
            _ => None,
        }
    }

    /// The interrupt request serving this line.
    pub fn irq_number(self) -> u32 {
        match self {
            LineId::Exti0 => nvic::EXTI0,
            LineId::Exti1 => nvic::EXTI1,
            LineId::Exti2 => nvic::EXTI2,
            LineId::Exti3 => nvic::EXTI3,
            LineId::Exti4 => nvic::EXTI4,
            LineId::Exti5
            | LineId::Exti6
            | LineId::Exti7
            | LineId::Exti8
            | LineId::Exti9 => nvic::EXTI9_5,
            LineId::Exti10
            | LineId::Exti11
            | LineId::Exti12
            | LineId::Exti13
            | LineId::Exti14
            | LineId::Exti15 => nvic::EXTI15_10,
        }
    }
}

/// Edge sensitivity of an external interrupt line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterruptMode {
    RisingEdge,
    FallingEdge,
    EitherEdge,
}

pub struct Exti<'a> {
    registers: StaticRef<ExtiRegisters>,
    syscfg: &'a Syscfg<'a>,
    nvic: &'a Nvic,
}

impl<'a> Exti<'a> {
    pub const fn new(
        registers: StaticRef<ExtiRegisters>,
        syscfg: &'a Syscfg<'a>,
        nvic: &'a Nvic,
    ) -> Self {
        Self {
            registers,
            syscfg,
            nvic,
        }
    }

    /// Wire a port's pin onto its external interrupt line.
    ///
    /// The steps run in a fixed order: the SYSCFG clock comes up before the
    /// routing registers are touched, both trigger selections are cleared
    /// before the requested edges are set, and any stale pending flag is
    /// cleared before the line is unmasked. The NVIC priority is programmed
    /// here, but the NVIC enable bit is left alone; call
    /// [`Exti::enable_interrupt`] to let the request reach the core.
    pub fn configure_interrupt(
        &self,
        port: PortId,
        line: LineId,
        mode: InterruptMode,
        priority: u8,
    ) {
        self.syscfg.enable_clock();
        self.syscfg.route_line(port, line);

        self.deselect_rising_trigger(line);
        self.deselect_falling_trigger(line);
        match mode {
            InterruptMode::RisingEdge => self.select_rising_trigger(line),
            InterruptMode::FallingEdge => self.select_falling_trigger(line),
            InterruptMode::EitherEdge => {
                self.select_rising_trigger(line);
                self.select_falling_trigger(line);
            }
        }

        self.clear_pending(line);
        self.unmask_interrupt(line);

        self.nvic.set_priority(line.irq_number(), priority);
    }

    /// Unmask the line and let its request reach the core.
    pub fn enable_interrupt(&self, line: LineId) {
        self.unmask_interrupt(line);
        self.nvic.enable(line.irq_number());
        self.clear_pending(line);
    }

    /// Mask the line and gate its request off at the NVIC. Note that lines
    /// 5-9 and 10-15 share their NVIC request, so this silences the other
    /// lines of the group as well.
    pub fn disable_interrupt(&self, line: LineId) {
        self.mask_interrupt(line);
        self.nvic.disable(line.irq_number());
        self.clear_pending(line);
    }

    pub fn mask_interrupt(&self, lineid: LineId) {
        match lineid {
            LineId::Exti0 => self.registers.imr.modify(IMR::MR0::CLEAR),
            LineId::Exti1 => self.registers.imr.modify(IMR::MR1::CLEAR),
            LineId::Exti2 => self.registers.imr.modify(IMR::MR2::CLEAR),
            LineId::Exti3 => self.registers.imr.modify(IMR::MR3::CLEAR),
            LineId::Exti4 => self.registers.imr.modify(IMR::MR4::CLEAR),
            LineId::Exti5 => self.registers.imr.modify(IMR::MR5::CLEAR),
            LineId::Exti6 => self.registers.imr.modify(IMR::MR6::CLEAR),
            LineId::Exti7 => self.registers.imr.modify(IMR::MR7::CLEAR),
            LineId::Exti8 => self.registers.imr.modify(IMR::MR8::CLEAR),
            LineId::Exti9 => self.registers.imr.modify(IMR::MR9::CLEAR),
            LineId::Exti10 => self.registers.imr.modify(IMR::MR10::CLEAR),
            LineId::Exti11 => self.registers.imr.modify(IMR::MR11::CLEAR),
            LineId::Exti12 => self.registers.imr.modify(IMR::MR12::CLEAR),
            LineId::Exti13 => self.registers.imr.modify(IMR::MR13::CLEAR),
            LineId::Exti14 => self.registers.imr.modify(IMR::MR14::CLEAR),
            LineId::Exti15 => self.registers.imr.modify(IMR::MR15::CLEAR),
        }
    }

    pub fn unmask_interrupt(&self, lineid: LineId) {
        match lineid {
            LineId::Exti0 => self.registers.imr.modify(IMR::MR0::SET),
            LineId::Exti1 => self.registers.imr.modify(IMR::MR1::SET),
            LineId::Exti2 => self.registers.imr.modify(IMR::MR2::SET),
            LineId::Exti3 => self.registers.imr.modify(IMR::MR3::SET),
            LineId::Exti4 => self.registers.imr.modify(IMR::MR4::SET),
            LineId::Exti5 => self.registers.imr.modify(IMR::MR5::SET),
            LineId::Exti6 => self.registers.imr.modify(IMR::MR6::SET),
            LineId::Exti7 => self.registers.imr.modify(IMR::MR7::SET),
            LineId::Exti8 => self.registers.imr.modify(IMR::MR8::SET),
            LineId::Exti9 => self.registers.imr.modify(IMR::MR9::SET),
            LineId::Exti10 => self.registers.imr.modify(IMR::MR10::SET),
            LineId::Exti11 => self.registers.imr.modify(IMR::MR11::SET),
            LineId::Exti12 => self.registers.imr.modify(IMR::MR12::SET),
            LineId::Exti13 => self.registers.imr.modify(IMR::MR13::SET),
            LineId::Exti14 => self.registers.imr.modify(IMR::MR14::SET),
            LineId::Exti15 => self.registers.imr.modify(IMR::MR15::SET),
        }
    }

    pub fn select_rising_trigger(&self, lineid: LineId) {
        match lineid {
            LineId::Exti0 => self.registers.rtsr.modify(RTSR::TR0::SET),
            LineId::Exti1 => self.registers.rtsr.modify(RTSR::TR1::SET),
            LineId::Exti2 => self.registers.rtsr.modify(RTSR::TR2::SET),
            LineId::Exti3 => self.registers.rtsr.modify(RTSR::TR3::SET),
            LineId::Exti4 => self.registers.rtsr.modify(RTSR::TR4::SET),
            LineId::Exti5 => self.registers.rtsr.modify(RTSR::TR5::SET),
            LineId::Exti6 => self.registers.rtsr.modify(RTSR::TR6::SET),
            LineId::Exti7 => self.registers.rtsr.modify(RTSR::TR7::SET),
            LineId::Exti8 => self.registers.rtsr.modify(RTSR::TR8::SET),
            LineId::Exti9 => self.registers.rtsr.modify(RTSR::TR9::SET),
            LineId::Exti10 => self.registers.rtsr.modify(RTSR::TR10::SET),
            LineId::Exti11 => self.registers.rtsr.modify(RTSR::TR11::SET),
            LineId::Exti12 => self.registers.rtsr.modify(RTSR::TR12::SET),
            LineId::Exti13 => self.registers.rtsr.modify(RTSR::TR13::SET),
            LineId::Exti14 => self.registers.rtsr.modify(RTSR::TR14::SET),
            LineId::Exti15 => self.registers.rtsr.modify(RTSR::TR15::SET),
        }
    }

    pub fn deselect_rising_trigger(&self, lineid: LineId) {
        match lineid {
            LineId::Exti0 => self.registers.rtsr.modify(RTSR::TR0::CLEAR),
            LineId::Exti1 => self.registers.rtsr.modify(RTSR::TR1::CLEAR),
            LineId::Exti2 => self.registers.rtsr.modify(RTSR::TR2::CLEAR),
            LineId::Exti3 => self.registers.rtsr.modify(RTSR::TR3::CLEAR),
            LineId::Exti4 => self.registers.rtsr.modify(RTSR::TR4::CLEAR),
            LineId::Exti5 => self.registers.rtsr.modify(RTSR::TR5::CLEAR),
            LineId::Exti6 => self.registers.rtsr.modify(RTSR::TR6::CLEAR),
            LineId::Exti7 => self.registers.rtsr.modify(RTSR::TR7::CLEAR),
            LineId::Exti8 => self.registers.rtsr.modify(RTSR::TR8::CLEAR),
            LineId::Exti9 => self.registers.rtsr.modify(RTSR::TR9::CLEAR),
            LineId::Exti10 => self.registers.rtsr.modify(RTSR::TR10::CLEAR),
            LineId::Exti11 => self.registers.rtsr.modify(RTSR::TR11::CLEAR),
            LineId::Exti12 => self.registers.rtsr.modify(RTSR::TR12::CLEAR),
            LineId::Exti13 => self.registers.rtsr.modify(RTSR::TR13::CLEAR),
            LineId::Exti14 => self.registers.rtsr.modify(RTSR::TR14::CLEAR),
            LineId::Exti15 => self.registers.rtsr.modify(RTSR::TR15::CLEAR),
        }
    }

    pub fn select_falling_trigger(&self, lineid: LineId) {
        match lineid {
            LineId::Exti0 => self.registers.ftsr.modify(FTSR::TR0::SET),
            LineId::Exti1 => self.registers.ftsr.modify(FTSR::TR1::SET),
            LineId::Exti2 => self.registers.ftsr.modify(FTSR::TR2::SET),
            LineId::Exti3 => self.registers.ftsr.modify(FTSR::TR3::SET),
            LineId::Exti4 => self.registers.ftsr.modify(FTSR::TR4::SET),
            LineId::Exti5 => self.registers.ftsr.modify(FTSR::TR5::SET),
            LineId::Exti6 => self.registers.ftsr.modify(FTSR::TR6::SET),
            LineId::Exti7 => self.registers.ftsr.modify(FTSR::TR7::SET),
            LineId::Exti8 => self.registers.ftsr.modify(FTSR::TR8::SET),
            LineId::Exti9 => self.registers.ftsr.modify(FTSR::TR9::SET),
            LineId::Exti10 => self.registers.ftsr.modify(FTSR::TR10::SET),
            LineId::Exti11 => self.registers.ftsr.modify(FTSR::TR11::SET),
            LineId::Exti12 => self.registers.ftsr.modify(FTSR::TR12::SET),
            LineId::Exti13 => self.registers.ftsr.modify(FTSR::TR13::SET),
            LineId::Exti14 => self.registers.ftsr.modify(FTSR::TR14::SET),
            LineId::Exti15 => self.registers.ftsr.modify(FTSR::TR15::SET),
        }
    }

    pub fn deselect_falling_trigger(&self, lineid: LineId) {
        match lineid {
            LineId::Exti0 => self.registers.ftsr.modify(FTSR::TR0::CLEAR),
            LineId::Exti1 => self.registers.ftsr.modify(FTSR::TR1::CLEAR),
            LineId::Exti2 => self.registers.ftsr.modify(FTSR::TR2::CLEAR),
            LineId::Exti3 => self.registers.ftsr.modify(FTSR::TR3::CLEAR),
            LineId::Exti4 => self.registers.ftsr.modify(FTSR::TR4::CLEAR),
            LineId::Exti5 => self.registers.ftsr.modify(FTSR::TR5::CLEAR),
            LineId::Exti6 => self.registers.ftsr.modify(FTSR::TR6::CLEAR),
            LineId::Exti7 => self.registers.ftsr.modify(FTSR::TR7::CLEAR),
            LineId::Exti8 => self.registers.ftsr.modify(FTSR::TR8::CLEAR),
            LineId::Exti9 => self.registers.ftsr.modify(FTSR::TR9::CLEAR),
            LineId::Exti10 => self.registers.ftsr.modify(FTSR::TR10::CLEAR),
            LineId::Exti11 => self.registers.ftsr.modify(FTSR::TR11::CLEAR),
            LineId::Exti12 => self.registers.ftsr.modify(FTSR::TR12::CLEAR),
            LineId::Exti13 => self.registers.ftsr.modify(FTSR::TR13::CLEAR),
            LineId::Exti14 => self.registers.ftsr.modify(FTSR::TR14::CLEAR),
            LineId::Exti15 => self.registers.ftsr.modify(FTSR::TR15::CLEAR),
        }
    }

    /// Clear the line's pending flag. EXTI pending is write-1-to-clear, so
    /// this is a single-bit strobe rather than a read-modify-write; the
    /// hardware drops the latched NVIC request along with it, so no NVIC
    /// register is touched.
    pub fn clear_pending(&self, lineid: LineId) {
        match lineid {
            LineId::Exti0 => self.registers.pr.write(PR::PR0::SET),
            LineId::Exti1 => self.registers.pr.write(PR::PR1::SET),
            LineId::Exti2 => self.registers.pr.write(PR::PR2::SET),
            LineId::Exti3 => self.registers.pr.write(PR::PR3::SET),
            LineId::Exti4 => self.registers.pr.write(PR::PR4::SET),
            LineId::Exti5 => self.registers.pr.write(PR::PR5::SET),
            LineId::Exti6 => self.registers.pr.write(PR::PR6::SET),
            LineId::Exti7 => self.registers.pr.write(PR::PR7::SET),
            LineId::Exti8 => self.registers.pr.write(PR::PR8::SET),
            LineId::Exti9 => self.registers.pr.write(PR::PR9::SET),
            LineId::Exti10 => self.registers.pr.write(PR::PR10::SET),
            LineId::Exti11 => self.registers.pr.write(PR::PR11::SET),
            LineId::Exti12 => self.registers.pr.write(PR::PR12::SET),
            LineId::Exti13 => self.registers.pr.write(PR::PR13::SET),
            LineId::Exti14 => self.registers.pr.write(PR::PR14::SET),
            LineId::Exti15 => self.registers.pr.write(PR::PR15::SET),
        }
    }

    pub fn is_pending(&self, lineid: LineId) -> bool {
        match lineid {
            LineId::Exti0 => self.registers.pr.is_set(PR::PR0),
            LineId::Exti1 => self.registers.pr.is_set(PR::PR1),
            LineId::Exti2 => self.registers.pr.is_set(PR::PR2),
            LineId::Exti3 => self.registers.pr.is_set(PR::PR3),
            LineId::Exti4 => self.registers.pr.is_set(PR::PR4),
            LineId::Exti5 => self.registers.pr.is_set(PR::PR5),
            LineId::Exti6 => self.registers.pr.is_set(PR::PR6),
            LineId::Exti7 => self.registers.pr.is_set(PR::PR7),
            LineId::Exti8 => self.registers.pr.is_set(PR::PR8),
            LineId::Exti9 => self.registers.pr.is_set(PR::PR9),
            LineId::Exti10 => self.registers.pr.is_set(PR::PR10),
            LineId::Exti11 => self.registers.pr.is_set(PR::PR11),
            LineId::Exti12 => self.registers.pr.is_set(PR::PR12),
            LineId::Exti13 => self.registers.pr.is_set(PR::PR13),
            LineId::Exti14 => self.registers.pr.is_set(PR::PR14),
            LineId::Exti15 => self.registers.pr.is_set(PR::PR15),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rcc::{Rcc, RccRegisters};
    use crate::syscfg::SyscfgRegisters;
    use crate::nvic::NvicRegisters;

    const IMR_WORD: usize = 0x00 / 4;
    const RTSR_WORD: usize = 0x08 / 4;
    const FTSR_WORD: usize = 0x0C / 4;
    const PR_WORD: usize = 0x14 / 4;

    const EXTICR4_WORD: usize = 0x14 / 4;
    const APB2ENR_WORD: usize = 0x44 / 4;
    const ISER_WORD: usize = 0x000 / 4;
    const ICER_WORD: usize = 0x080 / 4;
    const IPR_WORD: usize = 0x300 / 4;

    struct Ptrs {
        exti: *const u32,
        syscfg: *const u32,
        nvic: *const u32,
        rcc: *const u32,
    }

    fn with_exti(test: impl FnOnce(&Exti, &Ptrs)) {
        let mut exti_mem = [0u32; 6];
        let mut syscfg_mem = [0u32; 9];
        let mut nvic_mem = [0u32; 0xE04 / 4];
        let mut rcc_mem = [0u32; 34];
        let ptrs = Ptrs {
            exti: exti_mem.as_mut_ptr() as *const u32,
            syscfg: syscfg_mem.as_mut_ptr() as *const u32,
            nvic: nvic_mem.as_mut_ptr() as *const u32,
            rcc: rcc_mem.as_mut_ptr() as *const u32,
        };
        let rcc = Rcc::new(unsafe { StaticRef::new(ptrs.rcc as *const RccRegisters) });
        let syscfg = Syscfg::new(
            unsafe { StaticRef::new(ptrs.syscfg as *const SyscfgRegisters) },
            &rcc,
        );
        let nvic = Nvic::new(unsafe { StaticRef::new(ptrs.nvic as *const NvicRegisters) });
        let exti = Exti::new(
            unsafe { StaticRef::new(ptrs.exti as *const ExtiRegisters) },
            &syscfg,
            &nvic,
        );
        test(&exti, &ptrs);
    }

    fn read_word(ptr: *const u32, word: usize) -> u32 {
        unsafe { ptr.add(word).read() }
    }

    fn write_word(ptr: *const u32, word: usize, value: u32) {
        unsafe { (ptr as *mut u32).add(word).write(value) }
    }

    #[test]
    fn irq_mapping_for_dedicated_and_shared_lines() {
        assert_eq!(LineId::Exti0.irq_number(), 6);
        assert_eq!(LineId::Exti4.irq_number(), 10);
        for pin in 5..=9 {
            assert_eq!(LineId::from_pin(pin).unwrap().irq_number(), 23);
        }
        for pin in 10..=15 {
            assert_eq!(LineId::from_pin(pin).unwrap().irq_number(), 40);
        }
        assert!(LineId::from_pin(16).is_none());
    }

    #[test]
    fn configure_wires_gpioc_pin_13_falling_priority_5() {
        with_exti(|exti, ptrs| {
            exti.configure_interrupt(PortId::C, LineId::Exti13, InterruptMode::FallingEdge, 5);

            // SYSCFG clock on, line 13 routed to port C.
            assert_eq!(read_word(ptrs.rcc, APB2ENR_WORD), 1 << 14);
            assert_eq!(read_word(ptrs.syscfg, EXTICR4_WORD), 0b0010 << 4);

            // Falling edge only.
            assert_eq!(read_word(ptrs.exti, FTSR_WORD), 1 << 13);
            assert_eq!(read_word(ptrs.exti, RTSR_WORD), 0);

            // Line unmasked, priority programmed for IRQ 40, but the NVIC
            // enable bit stays untouched until enable_interrupt.
            assert_eq!(read_word(ptrs.exti, IMR_WORD), 1 << 13);
            assert_eq!(read_word(ptrs.nvic, IPR_WORD + 10), 5 << 4);
            assert_eq!(read_word(ptrs.nvic, ISER_WORD), 0);
            assert_eq!(read_word(ptrs.nvic, ISER_WORD + 1), 0);
        });
    }

    #[test]
    fn reconfigure_replaces_stale_trigger_selection() {
        with_exti(|exti, ptrs| {
            exti.configure_interrupt(PortId::A, LineId::Exti2, InterruptMode::RisingEdge, 1);
            assert_eq!(read_word(ptrs.exti, RTSR_WORD), 1 << 2);
            exti.configure_interrupt(PortId::A, LineId::Exti2, InterruptMode::FallingEdge, 1);
            assert_eq!(read_word(ptrs.exti, RTSR_WORD), 0);
            assert_eq!(read_word(ptrs.exti, FTSR_WORD), 1 << 2);
        });
    }

    #[test]
    fn either_edge_sets_both_triggers() {
        with_exti(|exti, ptrs| {
            exti.configure_interrupt(PortId::E, LineId::Exti7, InterruptMode::EitherEdge, 3);
            assert_eq!(read_word(ptrs.exti, RTSR_WORD), 1 << 7);
            assert_eq!(read_word(ptrs.exti, FTSR_WORD), 1 << 7);
        });
    }

    #[test]
    fn boundary_lines_reach_their_priority_slots() {
        with_exti(|exti, ptrs| {
            exti.configure_interrupt(PortId::A, LineId::Exti0, InterruptMode::RisingEdge, 7);
            // IRQ 6: slot 1, byte 2.
            assert_eq!(read_word(ptrs.nvic, IPR_WORD + 1), 7 << 20);
            exti.configure_interrupt(PortId::A, LineId::Exti15, InterruptMode::RisingEdge, 9);
            // IRQ 40: slot 10, byte 0.
            assert_eq!(read_word(ptrs.nvic, IPR_WORD + 10), 9 << 4);
        });
    }

    #[test]
    fn enable_unmasks_then_reaches_nvic() {
        with_exti(|exti, ptrs| {
            exti.enable_interrupt(LineId::Exti13);
            assert_eq!(read_word(ptrs.exti, IMR_WORD), 1 << 13);
            assert_eq!(read_word(ptrs.nvic, ISER_WORD + 1), 1 << 8);
        });
    }

    #[test]
    fn disable_masks_line_and_gates_nvic() {
        with_exti(|exti, ptrs| {
            write_word(ptrs.exti, IMR_WORD, 1 << 4);
            exti.disable_interrupt(LineId::Exti4);
            assert_eq!(read_word(ptrs.exti, IMR_WORD), 0);
            assert_eq!(read_word(ptrs.nvic, ICER_WORD), 1 << 10);
        });
    }

    #[test]
    fn clear_pending_strobes_only_the_line_bit() {
        with_exti(|exti, ptrs| {
            exti.clear_pending(LineId::Exti13);
            // Write-1-to-clear: exactly the line's bit is strobed into PR
            // and no NVIC register is written.
            assert_eq!(read_word(ptrs.exti, PR_WORD), 1 << 13);
            for word in 0..(0xE04 / 4) {
                assert_eq!(read_word(ptrs.nvic, word), 0);
            }
        });
    }

    #[test]
    fn pending_flag_is_readable_per_line() {
        with_exti(|exti, ptrs| {
            write_word(ptrs.exti, PR_WORD, 1 << 9);
            assert!(exti.is_pending(LineId::Exti9));
            assert!(!exti.is_pending(LineId::Exti8));
        });
    }
}
