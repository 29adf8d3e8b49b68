// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! System configuration controller (SYSCFG).
//!
//! Selects which GPIO port feeds each of the sixteen external interrupt
//! lines. Line `n` of every port shares EXTI line `n`; the 4-bit port code
//! in EXTICR1-EXTICR4 picks the winner, last write wins.

use tock_registers::interfaces::ReadWriteable;
use tock_registers::register_bitfields;
use tock_registers::registers::{ReadOnly, ReadWrite};

use crate::exti::LineId;
use crate::gpio::PortId;
use crate::rcc;
use crate::static_ref::StaticRef;
use crate::ClockInterface;

/// System configuration controller
#[repr(C)]
pub struct SyscfgRegisters {
    /// memory remap register
    memrmp: ReadWrite<u32>,
    /// peripheral mode configuration register
    pmc: ReadWrite<u32>,
    /// external interrupt configuration register 1
    exticr1: ReadWrite<u32, EXTICR1::Register>,
    /// external interrupt configuration register 2
    exticr2: ReadWrite<u32, EXTICR2::Register>,
    /// external interrupt configuration register 3
    exticr3: ReadWrite<u32, EXTICR3::Register>,
    /// external interrupt configuration register 4
    exticr4: ReadWrite<u32, EXTICR4::Register>,
    _reserved0: [u8; 8],
    /// compensation cell control register
    cmpcr: ReadOnly<u32>,
}

register_bitfields![u32,
    EXTICR1 [
        /// EXTI 0 port selector
        EXTI0 OFFSET(0) NUMBITS(4) [],
        /// EXTI 1 port selector
        EXTI1 OFFSET(4) NUMBITS(4) [],
        /// EXTI 2 port selector
        EXTI2 OFFSET(8) NUMBITS(4) [],
        /// EXTI 3 port selector
        EXTI3 OFFSET(12) NUMBITS(4) []
    ],
    EXTICR2 [
        /// EXTI 4 port selector
        EXTI4 OFFSET(0) NUMBITS(4) [],
        /// EXTI 5 port selector
        EXTI5 OFFSET(4) NUMBITS(4) [],
        /// EXTI 6 port selector
        EXTI6 OFFSET(8) NUMBITS(4) [],
        /// EXTI 7 port selector
        EXTI7 OFFSET(12) NUMBITS(4) []
    ],
    EXTICR3 [
        /// EXTI 8 port selector
        EXTI8 OFFSET(0) NUMBITS(4) [],
        /// EXTI 9 port selector
        EXTI9 OFFSET(4) NUMBITS(4) [],
        /// EXTI 10 port selector
        EXTI10 OFFSET(8) NUMBITS(4) [],
        /// EXTI 11 port selector
        EXTI11 OFFSET(12) NUMBITS(4) []
    ],
    EXTICR4 [
        /// EXTI 12 port selector
        EXTI12 OFFSET(0) NUMBITS(4) [],
        /// EXTI 13 port selector
        EXTI13 OFFSET(4) NUMBITS(4) [],
        /// EXTI 14 port selector
        EXTI14 OFFSET(8) NUMBITS(4) [],
        /// EXTI 15 port selector
        EXTI15 OFFSET(12) NUMBITS(4) []
    ]
];

pub const SYSCFG_BASE: StaticRef<SyscfgRegisters> =
    unsafe { StaticRef::new(0x4001_3800 as *const SyscfgRegisters) };

struct SyscfgClock<'a>(rcc::PeripheralClock<'a>);

impl ClockInterface for SyscfgClock<'_> {
    fn is_enabled(&self) -> bool {
        self.0.is_enabled()
    }

    fn enable(&self) {
        self.0.enable();
    }

    fn disable(&self) {
        self.0.disable();
    }
}

pub struct Syscfg<'a> {
    registers: StaticRef<SyscfgRegisters>,
    clock: SyscfgClock<'a>,
}

impl<'a> Syscfg<'a> {
    pub const fn new(registers: StaticRef<SyscfgRegisters>, rcc: &'a rcc::Rcc) -> Self {
        Self {
            registers,
            clock: SyscfgClock(rcc::PeripheralClock::new(
                rcc::PeripheralClockType::APB2(rcc::PCLK2::SYSCFG),
                rcc,
            )),
        }
    }

    pub fn is_enabled_clock(&self) -> bool {
        self.clock.is_enabled()
    }

    pub fn enable_clock(&self) {
        self.clock.enable();
    }

    pub fn disable_clock(&self) {
        self.clock.disable();
    }

    /// Route an external interrupt line to the given port. The previous
    /// routing of the line is overwritten.
    pub fn route_line(&self, port: PortId, line: LineId) {
        let code = port.exticr_code();
        match line {
            LineId::Exti0 => self.registers.exticr1.modify(EXTICR1::EXTI0.val(code)),
            LineId::Exti1 => self.registers.exticr1.modify(EXTICR1::EXTI1.val(code)),
            LineId::Exti2 => self.registers.exticr1.modify(EXTICR1::EXTI2.val(code)),
            LineId::Exti3 => self.registers.exticr1.modify(EXTICR1::EXTI3.val(code)),
            LineId::Exti4 => self.registers.exticr2.modify(EXTICR2::EXTI4.val(code)),
            LineId::Exti5 => self.registers.exticr2.modify(EXTICR2::EXTI5.val(code)),
            LineId::Exti6 => self.registers.exticr2.modify(EXTICR2::EXTI6.val(code)),
            LineId::Exti7 => self.registers.exticr2.modify(EXTICR2::EXTI7.val(code)),
            LineId::Exti8 => self.registers.exticr3.modify(EXTICR3::EXTI8.val(code)),
            LineId::Exti9 => self.registers.exticr3.modify(EXTICR3::EXTI9.val(code)),
            LineId::Exti10 => self.registers.exticr3.modify(EXTICR3::EXTI10.val(code)),
            LineId::Exti11 => self.registers.exticr3.modify(EXTICR3::EXTI11.val(code)),
            LineId::Exti12 => self.registers.exticr4.modify(EXTICR4::EXTI12.val(code)),
            LineId::Exti13 => self.registers.exticr4.modify(EXTICR4::EXTI13.val(code)),
            LineId::Exti14 => self.registers.exticr4.modify(EXTICR4::EXTI14.val(code)),
            LineId::Exti15 => self.registers.exticr4.modify(EXTICR4::EXTI15.val(code)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rcc::{Rcc, RccRegisters};

    const EXTICR1_WORD: usize = 0x08 / 4;
    const EXTICR4_WORD: usize = 0x14 / 4;
    const APB2ENR_WORD: usize = 0x44 / 4;

    fn with_syscfg(test: impl FnOnce(&Syscfg, *const u32, *const u32)) {
        let mut syscfg_mem = [0u32; 9];
        let mut rcc_mem = [0u32; 34];
        let syscfg_ptr = syscfg_mem.as_mut_ptr() as *const u32;
        let rcc_ptr = rcc_mem.as_mut_ptr() as *const u32;
        let rcc = Rcc::new(unsafe { StaticRef::new(rcc_ptr as *const RccRegisters) });
        let syscfg = Syscfg::new(
            unsafe { StaticRef::new(syscfg_ptr as *const SyscfgRegisters) },
            &rcc,
        );
        test(&syscfg, syscfg_ptr, rcc_ptr);
    }

    fn read_word(ptr: *const u32, word: usize) -> u32 {
        unsafe { ptr.add(word).read() }
    }

    #[test]
    fn line_13_routes_through_exticr4() {
        with_syscfg(|syscfg, syscfg_ptr, _| {
            syscfg.route_line(PortId::C, LineId::Exti13);
            assert_eq!(read_word(syscfg_ptr, EXTICR4_WORD), 0b0010 << 4);
        });
    }

    #[test]
    fn last_routing_wins() {
        with_syscfg(|syscfg, syscfg_ptr, _| {
            syscfg.route_line(PortId::I, LineId::Exti0);
            syscfg.route_line(PortId::B, LineId::Exti0);
            assert_eq!(read_word(syscfg_ptr, EXTICR1_WORD), 0b0001);
        });
    }

    #[test]
    fn routing_leaves_sibling_fields_untouched() {
        with_syscfg(|syscfg, syscfg_ptr, _| {
            syscfg.route_line(PortId::H, LineId::Exti1);
            syscfg.route_line(PortId::D, LineId::Exti3);
            assert_eq!(
                read_word(syscfg_ptr, EXTICR1_WORD),
                (0b0111 << 4) | (0b0011 << 12)
            );
        });
    }

    #[test]
    fn clock_gate_reaches_apb2enr() {
        with_syscfg(|syscfg, _, rcc_ptr| {
            assert!(!syscfg.is_enabled_clock());
            syscfg.enable_clock();
            assert_eq!(read_word(rcc_ptr, APB2ENR_WORD), 1 << 14);
            assert!(syscfg.is_enabled_clock());
        });
    }
}
