// Master: every 500 ms sends the next command of LED_ON, LED_OFF, TOGGLE to
// the slave on SPI1 (PA4 select, PA5 SCK, PA6 MISO, PA7 MOSI).

#![no_main]
#![no_std]

use cortex_m::asm;
use log::{info, warn};
use panic_semihosting as _;
use rtic::cyccnt::U32Ext;
use stm32f4xx_hal::{
  gpio::gpioa,
  gpio::Alternate,
  gpio::Output,
  gpio::PushPull,
  gpio::AF5,
  prelude::*,
  spi::Spi,
  stm32,
};

use spi_framer::command::Command;
use spi_framer::config::{BusConfig, ClockRate, FramerConfig};
use spi_framer::hw;
use spi_framer::spi_drv::{Master, SelectLine, SelectPolarity};
use spi_framer::util::{self, debugger};

type Spi1 = Spi<
  stm32::SPI1,
  (
    gpioa::PA5<Alternate<AF5>>,
    gpioa::PA6<Alternate<AF5>>,
    gpioa::PA7<Alternate<AF5>>,
  ),
>;

const PERIOD_US: u32 = 500_000;
// let the slave finish its own init first
const STARTUP_US: u32 = 1_000_000;

#[rtic::app(
  device = stm32f4xx_hal::stm32,
  peripherals = true,
  monotonic = rtic::cyccnt::CYCCNT
)]
const APP: () = {
  struct Resources {
    master: Master<Spi1>,
    line: SelectLine<gpioa::PA4<Output<PushPull>>>,
  }

  #[init(schedule = [send])]
  fn init(mut cx: init::Context) -> init::LateResources {
    debugger::init(log::LevelFilter::Info);

    // monotonic timer
    cx.core.DCB.enable_trace();
    cx.core.DWT.enable_cycle_counter();

    let device: stm32::Peripherals = cx.device;

    let rcc = device.RCC.constrain();
    let clocks = rcc.cfgr.sysclk(168.mhz()).freeze();

    let gpioa = device.GPIOA.split();
    let sck = gpioa.pa5.into_alternate_af5();
    let miso = gpioa.pa6.into_alternate_af5();
    let mosi = gpioa.pa7.into_alternate_af5();

    // the slave has to keep up with a byte per SCK burst, stay slow
    let config = BusConfig::master().clock_rate(ClockRate::Div128);
    let freq = config.clock_rate.frequency(clocks.pclk2().0);
    let spi = Spi::spi1(device.SPI1, (sck, miso, mosi), config.mode, freq.hz(), clocks);
    hw::set_master_bit_order(config.bit_order);

    let line = SelectLine::new(gpioa.pa4.into_push_pull_output(), SelectPolarity::Default).unwrap();

    info!("master running at {} Hz", freq);

    cx.schedule
      .send(cx.start + util::convert_us_to_cycles(STARTUP_US).cycles(), Command::LedOn)
      .unwrap();

    init::LateResources {
      master: Master::new(spi, FramerConfig::default()),
      line,
    }
  }

  #[task(schedule = [send], resources = [master, line])]
  fn send(cx: send::Context, command: Command) {
    if let Err(e) = command.send(cx.resources.master, cx.resources.line) {
      warn!("sending {:?} failed: {:?}", command, e);
    }

    let next = match command {
      Command::LedOn => Command::LedOff,
      Command::LedOff => Command::Toggle,
      _ => Command::LedOn,
    };
    cx.schedule
      .send(cx.scheduled + util::convert_us_to_cycles(PERIOD_US).cycles(), next)
      .unwrap();
  }

  #[idle]
  fn idle(_cx: idle::Context) -> ! {
    loop {
      // sleep while waiting for next event
      asm::wfi();
    }
  }

  extern "C" {
    fn SDIO();
  }
};
