// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reset and clock control (RCC).
//!
//! Drives the AHB1/APB1/APB2 peripheral clock gates and reset lines. The
//! clock tree itself (PLL, system clock source, bus prescalers) is left at
//! its power-on configuration.

use tock_registers::interfaces::{ReadWriteable, Readable};
use tock_registers::register_bitfields;
use tock_registers::registers::ReadWrite;

use crate::static_ref::StaticRef;
use crate::ClockInterface;

/// Reset and clock control
#[repr(C)]
pub struct RccRegisters {
    /// clock control register
    cr: ReadWrite<u32>,
    /// PLL configuration register
    pllcfgr: ReadWrite<u32>,
    /// clock configuration register
    cfgr: ReadWrite<u32>,
    /// clock interrupt register
    cir: ReadWrite<u32>,
    /// AHB1 peripheral reset register
    ahb1rstr: ReadWrite<u32, AHB1RSTR::Register>,
    /// AHB2 peripheral reset register
    ahb2rstr: ReadWrite<u32>,
    /// AHB3 peripheral reset register
    ahb3rstr: ReadWrite<u32>,
    _reserved0: [u8; 4],
    /// APB1 peripheral reset register
    apb1rstr: ReadWrite<u32, APB1RSTR::Register>,
    /// APB2 peripheral reset register
    apb2rstr: ReadWrite<u32, APB2RSTR::Register>,
    _reserved1: [u8; 8],
    /// AHB1 peripheral clock enable register
    ahb1enr: ReadWrite<u32, AHB1ENR::Register>,
    /// AHB2 peripheral clock enable register
    ahb2enr: ReadWrite<u32>,
    /// AHB3 peripheral clock enable register
    ahb3enr: ReadWrite<u32>,
    _reserved2: [u8; 4],
    /// APB1 peripheral clock enable register
    apb1enr: ReadWrite<u32, APB1ENR::Register>,
    /// APB2 peripheral clock enable register
    apb2enr: ReadWrite<u32, APB2ENR::Register>,
    _reserved3: [u8; 8],
    /// AHB1 peripheral clock enable in low power mode register
    ahb1lpenr: ReadWrite<u32>,
    /// AHB2 peripheral clock enable in low power mode register
    ahb2lpenr: ReadWrite<u32>,
    /// AHB3 peripheral clock enable in low power mode register
    ahb3lpenr: ReadWrite<u32>,
    _reserved4: [u8; 4],
    /// APB1 peripheral clock enable in low power mode register
    apb1lpenr: ReadWrite<u32>,
    /// APB2 peripheral clock enable in low power mode register
    apb2lpenr: ReadWrite<u32>,
    _reserved5: [u8; 8],
    /// Backup domain control register
    bdcr: ReadWrite<u32>,
    /// clock control & status register
    csr: ReadWrite<u32>,
    _reserved6: [u8; 8],
    /// spread spectrum clock generation register
    sscgr: ReadWrite<u32>,
    /// PLLI2S configuration register
    plli2scfgr: ReadWrite<u32>,
}

register_bitfields![u32,
    AHB1RSTR [
        /// IO port A reset
        GPIOARST OFFSET(0) NUMBITS(1) [],
        /// IO port B reset
        GPIOBRST OFFSET(1) NUMBITS(1) [],
        /// IO port C reset
        GPIOCRST OFFSET(2) NUMBITS(1) [],
        /// IO port D reset
        GPIODRST OFFSET(3) NUMBITS(1) [],
        /// IO port E reset
        GPIOERST OFFSET(4) NUMBITS(1) [],
        /// IO port F reset
        GPIOFRST OFFSET(5) NUMBITS(1) [],
        /// IO port G reset
        GPIOGRST OFFSET(6) NUMBITS(1) [],
        /// IO port H reset
        GPIOHRST OFFSET(7) NUMBITS(1) [],
        /// IO port I reset
        GPIOIRST OFFSET(8) NUMBITS(1) [],
        /// CRC reset
        CRCRST OFFSET(12) NUMBITS(1) [],
        /// DMA1 reset
        DMA1RST OFFSET(21) NUMBITS(1) [],
        /// DMA2 reset
        DMA2RST OFFSET(22) NUMBITS(1) [],
        /// Ethernet MAC reset
        ETHMACRST OFFSET(25) NUMBITS(1) [],
        /// USB OTG HS module reset
        OTGHSRST OFFSET(29) NUMBITS(1) []
    ],
    APB1RSTR [
        /// SPI2 reset
        SPI2RST OFFSET(14) NUMBITS(1) [],
        /// SPI3 reset
        SPI3RST OFFSET(15) NUMBITS(1) []
    ],
    APB2RSTR [
        /// SPI1 reset
        SPI1RST OFFSET(12) NUMBITS(1) [],
        /// System configuration controller reset
        SYSCFGRST OFFSET(14) NUMBITS(1) []
    ],
    AHB1ENR [
        /// IO port A clock enable
        GPIOAEN OFFSET(0) NUMBITS(1) [],
        /// IO port B clock enable
        GPIOBEN OFFSET(1) NUMBITS(1) [],
        /// IO port C clock enable
        GPIOCEN OFFSET(2) NUMBITS(1) [],
        /// IO port D clock enable
        GPIODEN OFFSET(3) NUMBITS(1) [],
        /// IO port E clock enable
        GPIOEEN OFFSET(4) NUMBITS(1) [],
        /// IO port F clock enable
        GPIOFEN OFFSET(5) NUMBITS(1) [],
        /// IO port G clock enable
        GPIOGEN OFFSET(6) NUMBITS(1) [],
        /// IO port H clock enable
        GPIOHEN OFFSET(7) NUMBITS(1) [],
        /// IO port I clock enable
        GPIOIEN OFFSET(8) NUMBITS(1) [],
        /// CRC clock enable
        CRCEN OFFSET(12) NUMBITS(1) [],
        /// DMA1 clock enable
        DMA1EN OFFSET(21) NUMBITS(1) [],
        /// DMA2 clock enable
        DMA2EN OFFSET(22) NUMBITS(1) []
    ],
    APB1ENR [
        /// SPI2 clock enable
        SPI2EN OFFSET(14) NUMBITS(1) [],
        /// SPI3 clock enable
        SPI3EN OFFSET(15) NUMBITS(1) []
    ],
    APB2ENR [
        /// SPI1 clock enable
        SPI1EN OFFSET(12) NUMBITS(1) [],
        /// System configuration controller clock enable
        SYSCFGEN OFFSET(14) NUMBITS(1) []
    ]
];

pub const RCC_BASE: StaticRef<RccRegisters> =
    unsafe { StaticRef::new(0x4002_3800 as *const RccRegisters) };

pub struct Rcc {
    registers: StaticRef<RccRegisters>,
}

impl Rcc {
    pub const fn new(registers: StaticRef<RccRegisters>) -> Rcc {
        Rcc { registers }
    }

    // GPIOA
    fn is_enabled_gpioa_clock(&self) -> bool {
        self.registers.ahb1enr.is_set(AHB1ENR::GPIOAEN)
    }

    fn enable_gpioa_clock(&self) {
        self.registers.ahb1enr.modify(AHB1ENR::GPIOAEN::SET)
    }

    fn disable_gpioa_clock(&self) {
        self.registers.ahb1enr.modify(AHB1ENR::GPIOAEN::CLEAR)
    }

    fn reset_gpioa(&self) {
        self.registers.ahb1rstr.modify(AHB1RSTR::GPIOARST::SET);
        self.registers.ahb1rstr.modify(AHB1RSTR::GPIOARST::CLEAR);
    }

    // GPIOB
    fn is_enabled_gpiob_clock(&self) -> bool {
        self.registers.ahb1enr.is_set(AHB1ENR::GPIOBEN)
    }

    fn enable_gpiob_clock(&self) {
        self.registers.ahb1enr.modify(AHB1ENR::GPIOBEN::SET)
    }

    fn disable_gpiob_clock(&self) {
        self.registers.ahb1enr.modify(AHB1ENR::GPIOBEN::CLEAR)
    }

    fn reset_gpiob(&self) {
        self.registers.ahb1rstr.modify(AHB1RSTR::GPIOBRST::SET);
        self.registers.ahb1rstr.modify(AHB1RSTR::GPIOBRST::CLEAR);
    }

    // GPIOC
    fn is_enabled_gpioc_clock(&self) -> bool {
        self.registers.ahb1enr.is_set(AHB1ENR::GPIOCEN)
    }

    fn enable_gpioc_clock(&self) {
        self.registers.ahb1enr.modify(AHB1ENR::GPIOCEN::SET)
    }

    fn disable_gpioc_clock(&self) {
        self.registers.ahb1enr.modify(AHB1ENR::GPIOCEN::CLEAR)
    }

    fn reset_gpioc(&self) {
        self.registers.ahb1rstr.modify(AHB1RSTR::GPIOCRST::SET);
        self.registers.ahb1rstr.modify(AHB1RSTR::GPIOCRST::CLEAR);
    }

    // GPIOD
    fn is_enabled_gpiod_clock(&self) -> bool {
        self.registers.ahb1enr.is_set(AHB1ENR::GPIODEN)
    }

    fn enable_gpiod_clock(&self) {
        self.registers.ahb1enr.modify(AHB1ENR::GPIODEN::SET)
    }

    fn disable_gpiod_clock(&self) {
        self.registers.ahb1enr.modify(AHB1ENR::GPIODEN::CLEAR)
    }

    fn reset_gpiod(&self) {
        self.registers.ahb1rstr.modify(AHB1RSTR::GPIODRST::SET);
        self.registers.ahb1rstr.modify(AHB1RSTR::GPIODRST::CLEAR);
    }

    // GPIOE
    fn is_enabled_gpioe_clock(&self) -> bool {
        self.registers.ahb1enr.is_set(AHB1ENR::GPIOEEN)
    }

    fn enable_gpioe_clock(&self) {
        self.registers.ahb1enr.modify(AHB1ENR::GPIOEEN::SET)
    }

    fn disable_gpioe_clock(&self) {
        self.registers.ahb1enr.modify(AHB1ENR::GPIOEEN::CLEAR)
    }

    fn reset_gpioe(&self) {
        self.registers.ahb1rstr.modify(AHB1RSTR::GPIOERST::SET);
        self.registers.ahb1rstr.modify(AHB1RSTR::GPIOERST::CLEAR);
    }

    // GPIOF
    fn is_enabled_gpiof_clock(&self) -> bool {
        self.registers.ahb1enr.is_set(AHB1ENR::GPIOFEN)
    }

    fn enable_gpiof_clock(&self) {
        self.registers.ahb1enr.modify(AHB1ENR::GPIOFEN::SET)
    }

    fn disable_gpiof_clock(&self) {
        self.registers.ahb1enr.modify(AHB1ENR::GPIOFEN::CLEAR)
    }

    fn reset_gpiof(&self) {
        self.registers.ahb1rstr.modify(AHB1RSTR::GPIOFRST::SET);
        self.registers.ahb1rstr.modify(AHB1RSTR::GPIOFRST::CLEAR);
    }

    // GPIOG
    fn is_enabled_gpiog_clock(&self) -> bool {
        self.registers.ahb1enr.is_set(AHB1ENR::GPIOGEN)
    }

    fn enable_gpiog_clock(&self) {
        self.registers.ahb1enr.modify(AHB1ENR::GPIOGEN::SET)
    }

    fn disable_gpiog_clock(&self) {
        self.registers.ahb1enr.modify(AHB1ENR::GPIOGEN::CLEAR)
    }

    fn reset_gpiog(&self) {
        self.registers.ahb1rstr.modify(AHB1RSTR::GPIOGRST::SET);
        self.registers.ahb1rstr.modify(AHB1RSTR::GPIOGRST::CLEAR);
    }

    // GPIOH
    fn is_enabled_gpioh_clock(&self) -> bool {
        self.registers.ahb1enr.is_set(AHB1ENR::GPIOHEN)
    }

    fn enable_gpioh_clock(&self) {
        self.registers.ahb1enr.modify(AHB1ENR::GPIOHEN::SET)
    }

    fn disable_gpioh_clock(&self) {
        self.registers.ahb1enr.modify(AHB1ENR::GPIOHEN::CLEAR)
    }

    fn reset_gpioh(&self) {
        self.registers.ahb1rstr.modify(AHB1RSTR::GPIOHRST::SET);
        self.registers.ahb1rstr.modify(AHB1RSTR::GPIOHRST::CLEAR);
    }

    // GPIOI
    fn is_enabled_gpioi_clock(&self) -> bool {
        self.registers.ahb1enr.is_set(AHB1ENR::GPIOIEN)
    }

    fn enable_gpioi_clock(&self) {
        self.registers.ahb1enr.modify(AHB1ENR::GPIOIEN::SET)
    }

    fn disable_gpioi_clock(&self) {
        self.registers.ahb1enr.modify(AHB1ENR::GPIOIEN::CLEAR)
    }

    fn reset_gpioi(&self) {
        self.registers.ahb1rstr.modify(AHB1RSTR::GPIOIRST::SET);
        self.registers.ahb1rstr.modify(AHB1RSTR::GPIOIRST::CLEAR);
    }

    // SYSCFG
    fn is_enabled_syscfg_clock(&self) -> bool {
        self.registers.apb2enr.is_set(APB2ENR::SYSCFGEN)
    }

    fn enable_syscfg_clock(&self) {
        self.registers.apb2enr.modify(APB2ENR::SYSCFGEN::SET)
    }

    fn disable_syscfg_clock(&self) {
        self.registers.apb2enr.modify(APB2ENR::SYSCFGEN::CLEAR)
    }

    fn reset_syscfg(&self) {
        self.registers.apb2rstr.modify(APB2RSTR::SYSCFGRST::SET);
        self.registers.apb2rstr.modify(APB2RSTR::SYSCFGRST::CLEAR);
    }

    // SPI1
    fn is_enabled_spi1_clock(&self) -> bool {
        self.registers.apb2enr.is_set(APB2ENR::SPI1EN)
    }

    fn enable_spi1_clock(&self) {
        self.registers.apb2enr.modify(APB2ENR::SPI1EN::SET)
    }

    fn disable_spi1_clock(&self) {
        self.registers.apb2enr.modify(APB2ENR::SPI1EN::CLEAR)
    }

    fn reset_spi1(&self) {
        self.registers.apb2rstr.modify(APB2RSTR::SPI1RST::SET);
        self.registers.apb2rstr.modify(APB2RSTR::SPI1RST::CLEAR);
    }

    // SPI2
    fn is_enabled_spi2_clock(&self) -> bool {
        self.registers.apb1enr.is_set(APB1ENR::SPI2EN)
    }

    fn enable_spi2_clock(&self) {
        self.registers.apb1enr.modify(APB1ENR::SPI2EN::SET)
    }

    fn disable_spi2_clock(&self) {
        self.registers.apb1enr.modify(APB1ENR::SPI2EN::CLEAR)
    }

    fn reset_spi2(&self) {
        self.registers.apb1rstr.modify(APB1RSTR::SPI2RST::SET);
        self.registers.apb1rstr.modify(APB1RSTR::SPI2RST::CLEAR);
    }

    // SPI3
    fn is_enabled_spi3_clock(&self) -> bool {
        self.registers.apb1enr.is_set(APB1ENR::SPI3EN)
    }

    fn enable_spi3_clock(&self) {
        self.registers.apb1enr.modify(APB1ENR::SPI3EN::SET)
    }

    fn disable_spi3_clock(&self) {
        self.registers.apb1enr.modify(APB1ENR::SPI3EN::CLEAR)
    }

    fn reset_spi3(&self) {
        self.registers.apb1rstr.modify(APB1RSTR::SPI3RST::SET);
        self.registers.apb1rstr.modify(APB1RSTR::SPI3RST::CLEAR);
    }
}

/// Bus + peripheral identity for a single clock gate.
pub enum PeripheralClockType {
    AHB1(HCLK1),
    APB1(PCLK1),
    APB2(PCLK2),
}

/// Peripherals clocked by HCLK1
pub enum HCLK1 {
    GPIOA,
    GPIOB,
    GPIOC,
    GPIOD,
    GPIOE,
    GPIOF,
    GPIOG,
    GPIOH,
    GPIOI,
}

/// Peripherals clocked by PCLK1
pub enum PCLK1 {
    SPI2,
    SPI3,
}

/// Peripherals clocked by PCLK2
pub enum PCLK2 {
    SPI1,
    SYSCFG,
}

pub struct PeripheralClock<'a> {
    pub clock: PeripheralClockType,
    rcc: &'a Rcc,
}

impl<'a> PeripheralClock<'a> {
    pub const fn new(clock: PeripheralClockType, rcc: &'a Rcc) -> Self {
        Self { clock, rcc }
    }

    /// Pulse the peripheral's reset line, returning its registers to their
    /// power-on values.
    pub fn reset(&self) {
        match self.clock {
            PeripheralClockType::AHB1(ref v) => match v {
                HCLK1::GPIOA => self.rcc.reset_gpioa(),
                HCLK1::GPIOB => self.rcc.reset_gpiob(),
                HCLK1::GPIOC => self.rcc.reset_gpioc(),
                HCLK1::GPIOD => self.rcc.reset_gpiod(),
                HCLK1::GPIOE => self.rcc.reset_gpioe(),
                HCLK1::GPIOF => self.rcc.reset_gpiof(),
                HCLK1::GPIOG => self.rcc.reset_gpiog(),
                HCLK1::GPIOH => self.rcc.reset_gpioh(),
                HCLK1::GPIOI => self.rcc.reset_gpioi(),
            },
            PeripheralClockType::APB1(ref v) => match v {
                PCLK1::SPI2 => self.rcc.reset_spi2(),
                PCLK1::SPI3 => self.rcc.reset_spi3(),
            },
            PeripheralClockType::APB2(ref v) => match v {
                PCLK2::SPI1 => self.rcc.reset_spi1(),
                PCLK2::SYSCFG => self.rcc.reset_syscfg(),
            },
        }
    }
}

impl ClockInterface for PeripheralClock<'_> {
    fn is_enabled(&self) -> bool {
        match self.clock {
            PeripheralClockType::AHB1(ref v) => match v {
                HCLK1::GPIOA => self.rcc.is_enabled_gpioa_clock(),
                HCLK1::GPIOB => self.rcc.is_enabled_gpiob_clock(),
                HCLK1::GPIOC => self.rcc.is_enabled_gpioc_clock(),
                HCLK1::GPIOD => self.rcc.is_enabled_gpiod_clock(),
                HCLK1::GPIOE => self.rcc.is_enabled_gpioe_clock(),
                HCLK1::GPIOF => self.rcc.is_enabled_gpiof_clock(),
                HCLK1::GPIOG => self.rcc.is_enabled_gpiog_clock(),
                HCLK1::GPIOH => self.rcc.is_enabled_gpioh_clock(),
                HCLK1::GPIOI => self.rcc.is_enabled_gpioi_clock(),
            },
            PeripheralClockType::APB1(ref v) => match v {
                PCLK1::SPI2 => self.rcc.is_enabled_spi2_clock(),
                PCLK1::SPI3 => self.rcc.is_enabled_spi3_clock(),
            },
            PeripheralClockType::APB2(ref v) => match v {
                PCLK2::SPI1 => self.rcc.is_enabled_spi1_clock(),
                PCLK2::SYSCFG => self.rcc.is_enabled_syscfg_clock(),
            },
        }
    }

    fn enable(&self) {
        match self.clock {
            PeripheralClockType::AHB1(ref v) => match v {
                HCLK1::GPIOA => self.rcc.enable_gpioa_clock(),
                HCLK1::GPIOB => self.rcc.enable_gpiob_clock(),
                HCLK1::GPIOC => self.rcc.enable_gpioc_clock(),
                HCLK1::GPIOD => self.rcc.enable_gpiod_clock(),
                HCLK1::GPIOE => self.rcc.enable_gpioe_clock(),
                HCLK1::GPIOF => self.rcc.enable_gpiof_clock(),
                HCLK1::GPIOG => self.rcc.enable_gpiog_clock(),
                HCLK1::GPIOH => self.rcc.enable_gpioh_clock(),
                HCLK1::GPIOI => self.rcc.enable_gpioi_clock(),
            },
            PeripheralClockType::APB1(ref v) => match v {
                PCLK1::SPI2 => self.rcc.enable_spi2_clock(),
                PCLK1::SPI3 => self.rcc.enable_spi3_clock(),
            },
            PeripheralClockType::APB2(ref v) => match v {
                PCLK2::SPI1 => self.rcc.enable_spi1_clock(),
                PCLK2::SYSCFG => self.rcc.enable_syscfg_clock(),
            },
        }
    }

    fn disable(&self) {
        match self.clock {
            PeripheralClockType::AHB1(ref v) => match v {
                HCLK1::GPIOA => self.rcc.disable_gpioa_clock(),
                HCLK1::GPIOB => self.rcc.disable_gpiob_clock(),
                HCLK1::GPIOC => self.rcc.disable_gpioc_clock(),
                HCLK1::GPIOD => self.rcc.disable_gpiod_clock(),
                HCLK1::GPIOE => self.rcc.disable_gpioe_clock(),
                HCLK1::GPIOF => self.rcc.disable_gpiof_clock(),
                HCLK1::GPIOG => self.rcc.disable_gpiog_clock(),
                HCLK1::GPIOH => self.rcc.disable_gpioh_clock(),
                HCLK1::GPIOI => self.rcc.disable_gpioi_clock(),
            },
            PeripheralClockType::APB1(ref v) => match v {
                PCLK1::SPI2 => self.rcc.disable_spi2_clock(),
                PCLK1::SPI3 => self.rcc.disable_spi3_clock(),
            },
            PeripheralClockType::APB2(ref v) => match v {
                PCLK2::SPI1 => self.rcc.disable_spi1_clock(),
                PCLK2::SYSCFG => self.rcc.disable_syscfg_clock(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AHB1ENR_WORD: usize = 0x30 / 4;
    const AHB1RSTR_WORD: usize = 0x10 / 4;
    const APB1ENR_WORD: usize = 0x40 / 4;
    const APB2ENR_WORD: usize = 0x44 / 4;

    fn with_rcc(test: impl FnOnce(&Rcc, *const u32)) {
        let mut mem = [0u32; 34];
        let ptr = mem.as_mut_ptr() as *const u32;
        let rcc = Rcc::new(unsafe { StaticRef::new(ptr as *const RccRegisters) });
        test(&rcc, ptr);
    }

    fn read_word(ptr: *const u32, word: usize) -> u32 {
        unsafe { ptr.add(word).read() }
    }

    #[test]
    fn gpio_gate_bit_positions() {
        with_rcc(|rcc, ptr| {
            rcc.enable_gpioa_clock();
            rcc.enable_gpioc_clock();
            rcc.enable_gpioi_clock();
            assert_eq!(read_word(ptr, AHB1ENR_WORD), (1 << 0) | (1 << 2) | (1 << 8));
            assert!(rcc.is_enabled_gpioc_clock());
            rcc.disable_gpioc_clock();
            assert_eq!(read_word(ptr, AHB1ENR_WORD), (1 << 0) | (1 << 8));
            assert!(!rcc.is_enabled_gpioc_clock());
        });
    }

    #[test]
    fn syscfg_and_spi_gate_bit_positions() {
        with_rcc(|rcc, ptr| {
            rcc.enable_syscfg_clock();
            rcc.enable_spi1_clock();
            assert_eq!(read_word(ptr, APB2ENR_WORD), (1 << 14) | (1 << 12));
            rcc.enable_spi2_clock();
            rcc.enable_spi3_clock();
            assert_eq!(read_word(ptr, APB1ENR_WORD), (1 << 14) | (1 << 15));
        });
    }

    #[test]
    fn enable_is_idempotent() {
        with_rcc(|rcc, ptr| {
            rcc.enable_gpiob_clock();
            let first = read_word(ptr, AHB1ENR_WORD);
            rcc.enable_gpiob_clock();
            assert_eq!(read_word(ptr, AHB1ENR_WORD), first);
        });
    }

    #[test]
    fn reset_pulse_leaves_line_deasserted() {
        with_rcc(|rcc, ptr| {
            rcc.reset_gpiod();
            assert_eq!(read_word(ptr, AHB1RSTR_WORD), 0);
        });
    }

    #[test]
    fn peripheral_clock_dispatches_by_identity() {
        with_rcc(|rcc, ptr| {
            let clock = PeripheralClock::new(
                PeripheralClockType::AHB1(HCLK1::GPIOH),
                rcc,
            );
            assert!(!ClockInterface::is_enabled(&clock));
            ClockInterface::enable(&clock);
            assert_eq!(read_word(ptr, AHB1ENR_WORD), 1 << 7);
            assert!(ClockInterface::is_enabled(&clock));
            ClockInterface::disable(&clock);
            assert_eq!(read_word(ptr, AHB1ENR_WORD), 0);
        });
    }
}
