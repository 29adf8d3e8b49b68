// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nested vectored interrupt controller (Cortex-M4).
//!
//! Enable, disable and pending control are single-bit strobes into the
//! write-1-to-set/clear banks, so no read-modify-write is needed there.
//! Priorities live in byte-wide IPR slots of which only the upper four
//! bits are implemented.

use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::registers::{ReadOnly, ReadWrite, WriteOnly};

use crate::static_ref::StaticRef;

/// Nested vectored interrupt controller
#[repr(C)]
pub struct NvicRegisters {
    /// interrupt set-enable registers
    iser: [ReadWrite<u32>; 8],
    _reserved0: [u8; 96],
    /// interrupt clear-enable registers
    icer: [ReadWrite<u32>; 8],
    _reserved1: [u8; 96],
    /// interrupt set-pending registers
    ispr: [ReadWrite<u32>; 8],
    _reserved2: [u8; 96],
    /// interrupt clear-pending registers
    icpr: [ReadWrite<u32>; 8],
    _reserved3: [u8; 96],
    /// interrupt active bit registers
    iabr: [ReadOnly<u32>; 8],
    _reserved4: [u8; 224],
    /// interrupt priority registers
    ipr: [ReadWrite<u32>; 60],
    _reserved5: [u8; 2576],
    /// software trigger interrupt register
    stir: WriteOnly<u32>,
}

pub const NVIC_BASE: StaticRef<NvicRegisters> =
    unsafe { StaticRef::new(0xE000_E100 as *const NvicRegisters) };

// Interrupt request numbers, STM32F407xx vector table.
pub const WWDG: u32 = 0;
pub const PVD: u32 = 1;
pub const TAMP_STAMP: u32 = 2;
pub const RTC_WKUP: u32 = 3;
pub const FLASH: u32 = 4;
pub const RCC: u32 = 5;
pub const EXTI0: u32 = 6;
pub const EXTI1: u32 = 7;
pub const EXTI2: u32 = 8;
pub const EXTI3: u32 = 9;
pub const EXTI4: u32 = 10;
pub const DMA1_STREAM0: u32 = 11;
pub const DMA1_STREAM1: u32 = 12;
pub const DMA1_STREAM2: u32 = 13;
pub const DMA1_STREAM3: u32 = 14;
pub const DMA1_STREAM4: u32 = 15;
pub const DMA1_STREAM5: u32 = 16;
pub const DMA1_STREAM6: u32 = 17;
pub const ADC: u32 = 18;
pub const EXTI9_5: u32 = 23;
pub const TIM2: u32 = 28;
pub const TIM3: u32 = 29;
pub const TIM4: u32 = 30;
pub const I2C1_EV: u32 = 31;
pub const I2C1_ER: u32 = 32;
pub const I2C2_EV: u32 = 33;
pub const I2C2_ER: u32 = 34;
pub const SPI1: u32 = 35;
pub const SPI2: u32 = 36;
pub const USART1: u32 = 37;
pub const USART2: u32 = 38;
pub const USART3: u32 = 39;
pub const EXTI15_10: u32 = 40;
pub const RTC_ALARM: u32 = 41;
pub const OTG_FS_WKUP: u32 = 42;
pub const SPI3: u32 = 51;

pub struct Nvic {
    registers: StaticRef<NvicRegisters>,
}

impl Nvic {
    pub const fn new(registers: StaticRef<NvicRegisters>) -> Nvic {
        Nvic { registers }
    }

    pub fn enable(&self, irq: u32) {
        let idx = (irq / 32) as usize;
        self.registers.iser[idx].set(1 << (irq & 31));
    }

    pub fn disable(&self, irq: u32) {
        let idx = (irq / 32) as usize;
        self.registers.icer[idx].set(1 << (irq & 31));
    }

    pub fn is_enabled(&self, irq: u32) -> bool {
        let idx = (irq / 32) as usize;
        self.registers.iser[idx].get() & (1 << (irq & 31)) != 0
    }

    pub fn clear_pending(&self, irq: u32) {
        let idx = (irq / 32) as usize;
        self.registers.icpr[idx].set(1 << (irq & 31));
    }

    pub fn is_pending(&self, irq: u32) -> bool {
        let idx = (irq / 32) as usize;
        self.registers.ispr[idx].get() & (1 << (irq & 31)) != 0
    }

    /// Program the interrupt's 4-bit preemption priority. The hardware
    /// implements only the upper nibble of each priority byte.
    pub fn set_priority(&self, irq: u32, priority: u8) {
        let index = (irq / 4) as usize;
        let shift = (irq % 4) * 8 + 4;
        let ipr = &self.registers.ipr[index];
        let value = ipr.get() & !(0xFF << shift);
        ipr.set(value | (((priority & 0x0F) as u32) << shift));
    }
}
