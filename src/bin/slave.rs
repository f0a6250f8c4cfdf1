// Slave: frames messages in the SPI1 interrupt and drives the green LED (PD12).
//
// "TOGGLE" flips the LED, packed 0x1234 / 0x4321 switch it on / off.
// Wiring: PA4 NSS, PA5 SCK, PA6 MISO, PA7 MOSI to the master's SPI1.

#![no_main]
#![no_std]

use log::{info, warn};
use panic_semihosting as _;
use stm32f4xx_hal::{
  gpio::gpiod,
  gpio::Output,
  gpio::PushPull,
  prelude::*,
  stm32,
};

use spi_framer::command::Command;
use spi_framer::config::{BusConfig, FramerConfig};
use spi_framer::constants::DEFAULT_CAPACITY;
use spi_framer::hw::SlaveSpi;
use spi_framer::indicator;
use spi_framer::spi_drv::{Exchange, Framer, RxInterrupt, Slave};
use spi_framer::util::debugger;

#[rtic::app(device = stm32f4xx_hal::stm32, peripherals = true)]
const APP: () = {
  struct Resources {
    slave: Slave<SlaveSpi>,
    framer: Framer<DEFAULT_CAPACITY>,
    led: indicator::Data<gpiod::PD12<Output<PushPull>>>,
  }

  #[init]
  fn init(cx: init::Context) -> init::LateResources {
    debugger::init(log::LevelFilter::Info);

    let device: stm32::Peripherals = cx.device;

    let rcc = device.RCC.constrain();
    let _clocks = rcc.cfgr.sysclk(168.mhz()).freeze();

    let gpioa = device.GPIOA.split();
    let gpiod = device.GPIOD.split();

    let pins = (
      gpioa.pa4.into_alternate_af5(),
      gpioa.pa5.into_alternate_af5(),
      gpioa.pa6.into_alternate_af5(),
      gpioa.pa7.into_alternate_af5(),
    );
    let mut slave = Slave::new(SlaveSpi::new(device.SPI1, pins, &BusConfig::slave()).unwrap());
    slave.listen();

    let led = indicator::Data::new(gpiod.pd12.into_push_pull_output()).unwrap();

    info!("slave ready");

    init::LateResources {
      slave,
      framer: Framer::with_config(FramerConfig::default()),
      led,
    }
  }

  #[task(binds = SPI1, priority = 2, resources = [slave, framer])]
  fn spi1(cx: spi1::Context) {
    // errors are counted in the framer stats
    let _ = cx.resources.slave.on_interrupt(cx.resources.framer);
  }

  #[idle(resources = [framer, led])]
  fn idle(mut cx: idle::Context) -> ! {
    let mut exchange: Exchange<DEFAULT_CAPACITY> = Exchange::new();

    loop {
      if !exchange.message_ready(&mut cx.resources.framer) {
        continue;
      }

      let command = Command::decode(exchange.message());
      match command.indicator_message() {
        Some(msg) => {
          info!("command {:?}", command);
          cx.resources.led.handle(msg).unwrap();
        }
        None => warn!("unknown message {:?}", exchange.message()),
      }
    }
  }
};
