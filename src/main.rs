#![no_std]
#![no_main]

#[allow(unused)]
use log::{debug, error, info, trace, warn};

use static_cell::StaticCell;

use embassy_executor::Executor;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::{gpio, Config};

use panic_probe as _;

mod reservoir;
mod serial;

static EXECUTOR: StaticCell<Executor> = StaticCell::new();

fn config() -> Config {
    use embassy_stm32::rcc::*;
    let mut config = embassy_stm32::Config::default();
    // 8MHz hsi_clk, /2 into the PLL, x16 for a 64MHz sysclk
    config.rcc.hsi = true;
    config.rcc.hse = None;
    config.rcc.pll = Some(Pll {
        src: PllSource::HSI,
        prediv: PllPreDiv::DIV2,
        mul: PllMul::MUL16,
    });
    config.rcc.sys = Sysclk::PLL1_P; // 64 MHz
    config.rcc.ahb_pre = AHBPrescaler::DIV1; // 64 MHz
    config.rcc.apb1_pre = APBPrescaler::DIV2; // 32 MHz (36 max)
    config.rcc.apb2_pre = APBPrescaler::DIV1; // 64 MHz
    config
}

/// Terminal fault state: interrupts off, halt until the next reset.
/// No diagnostic beyond the report lines already on the wire.
fn fatal() -> ! {
    cortex_m::interrupt::disable();
    loop {
        cortex_m::asm::wfe();
    }
}

#[cortex_m_rt::entry]
fn main() -> ! {
    rtt_target::rtt_init_log!();
    info!("srampuf {}", env!("GIT_REV"));

    let executor = EXECUTOR.init(Executor::new());
    executor.run(|spawner| spawner.spawn(run()).unwrap())
}

#[embassy_executor::task]
async fn run() {
    let p = embassy_stm32::init(config());

    // Nucleo-F103RB wiring: LD2 user led, B1 user button on EXTI13. The
    // button interrupt is armed but nothing consumes it, and it shares no
    // state with the reporting path.
    let _led = gpio::Output::new(p.PA5, gpio::Level::Low, gpio::Speed::Low);
    let _button = ExtiInput::new(p.PC13, p.EXTI13, gpio::Pull::None);

    let mut sink = match serial::setup(p.USART2, p.PA2, p.DMA1_CH7) {
        Ok(sink) => sink,
        Err(e) => {
            error!("usart bring-up failed: {:?}", e);
            fatal();
        }
    };

    let fp = reservoir::fingerprint();

    match puf_report::report(&fp, &mut sink).await {
        Ok(()) => info!("report sent"),
        Err(e) => {
            error!("report stalled at record {}: {:?}", e.index, e.cause);
            fatal();
        }
    }

    // Idle hold for the rest of the power cycle
    core::future::pending::<()>().await
}
