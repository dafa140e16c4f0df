//! roundgauge firmware - nRF52840 + GC9A01 round display.
//!
//! Tasks:
//!   - `pot_task`: samples the potentiometer through the SAADC, filters it
//!     and publishes the latest gauge percent.
//!   - `main`: the cooperative frame loop. Polls every button once per
//!     frame, applies navigation, and redraws what changed.

#![no_std]
#![no_main]

use defmt::{debug, info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Level, Output, OutputDrive, Pin as _};
use embassy_nrf::peripherals::SPI3;
use embassy_nrf::saadc::{self, ChannelConfig, Saadc};
use embassy_nrf::spim::{self, Spim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Delay, Duration, Instant, Ticker, Timer};
use embedded_hal_bus::spi::ExclusiveDevice;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use roundgauge::buttons::{ButtonClassifier, ButtonEvent, Clock, PullMode};
use roundgauge::config::{BUTTON_COUNT, FRAME_DELAY_MS, POT_SAMPLE_MS};
use roundgauge::fps::FpsCounter;
use roundgauge::pot_logic::PotFilter;
use roundgauge::ui::buttons::{EmbassyClock, NrfLines};
use roundgauge::ui::display;
use roundgauge::ui::input_logic::{self, UiAction, UiState};
use roundgauge::ui::render::{FrameData, View};
use roundgauge::ui::Button;

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM3 => spim::InterruptHandler<peripherals::SPI3>;
});

/// Latest filtered potentiometer level (percent).
static POT_LEVEL: Signal<CriticalSectionRawMutex, u8> = Signal::new();

/// Ask `pot_task` to drop its filter history.
static POT_RESET: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// SPIM3 with software chip select.
type PanelSpi = ExclusiveDevice<Spim<'static, SPI3>, Output<'static>, Delay>;

static DISPLAY_BUF: StaticCell<[u8; 512]> = StaticCell::new();

#[embassy_executor::task]
async fn pot_task(mut adc: Saadc<'static, 1>) -> ! {
    let mut filter = PotFilter::new();
    let mut ticker = Ticker::every(Duration::from_millis(POT_SAMPLE_MS));

    loop {
        if POT_RESET.try_take().is_some() {
            filter.reset();
        }

        let mut buf = [0i16; 1];
        adc.sample(&mut buf).await;

        if let Some(percent) = filter.push(buf[0]) {
            debug!("Pot: raw={} -> {}%", buf[0], percent);
            POT_LEVEL.signal(percent);
        }

        ticker.next().await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("roundgauge {} starting", env!("CARGO_PKG_VERSION"));

    // Potentiometer on AIN0.
    let mut adc_config = saadc::Config::default();
    adc_config.resolution = saadc::Resolution::_12BIT;
    let mut adc = Saadc::new(
        p.SAADC,
        Irqs,
        adc_config,
        [ChannelConfig::single_ended(p.P0_02)],
    );
    adc.calibrate().await;
    unwrap!(spawner.spawn(pot_task(adc)));

    // Display on SPIM3.
    let mut spi_config = spim::Config::default();
    spi_config.frequency = spim::Frequency::M32;
    let spim = Spim::new_txonly(p.SPI3, Irqs, p.P0_27, p.P0_26, spi_config);
    let cs = Output::new(p.P0_30, Level::High, OutputDrive::Standard);
    let dc = Output::new(p.P0_31, Level::Low, OutputDrive::Standard);
    let rst = Output::new(p.P0_29, Level::High, OutputDrive::Standard);
    let spi: PanelSpi = unwrap!(ExclusiveDevice::new(spim, cs, Delay));
    let mut panel = unwrap!(display::init(spi, dc, rst, DISPLAY_BUF.init([0; 512])));
    info!("Display ready");
    display::splash(&mut panel).await;

    // Buttons, channel id = index into `Button::ALL`.
    let lines = NrfLines::<BUTTON_COUNT>::new([p.P0_11.degrade(), p.P0_12.degrade(), p.P0_24.degrade()]);
    let clock = EmbassyClock;
    let mut buttons = unwrap!(ButtonClassifier::new(
        Button::ALL.map(Button::channel),
        lines,
        clock
    ));
    buttons.activate(PullMode::PullUp);
    let hold_threshold_ms = buttons.timing().hold_threshold_ms;
    info!("Buttons ready ({} channels)", BUTTON_COUNT);

    let mut ui = UiState::new();
    let mut view = View::new();
    let mut fps = FpsCounter::new(clock.now_ms());
    let mut percent = 0u8;

    loop {
        for button in Button::ALL {
            let event = buttons.poll(button.channel());
            if event == ButtonEvent::None {
                continue;
            }
            info!("Button: {} {}", button, event);

            match input_logic::handle_event(&mut ui, button, event) {
                UiAction::ShowScreen(screen) => info!("UI: screen {}", screen),
                UiAction::ToggleFps(on) => info!("UI: fps overlay {}", on),
                UiAction::ResetPot => {
                    info!("UI: re-reading potentiometer");
                    POT_RESET.signal(());
                }
                UiAction::None => {}
            }
        }

        if let Some(level) = POT_LEVEL.try_take() {
            percent = level;
        }

        let frame = FrameData {
            screen: ui.screen,
            percent,
            show_fps: ui.show_fps,
            fps: fps.frame(clock.now_ms()),
            hold_progress: input_logic::hold_progress(
                buttons.pressed_duration(Button::Select.channel()),
                hold_threshold_ms,
            ),
            held_ms: Button::ALL.map(|b| buttons.pressed_duration(b.channel())),
            uptime_secs: Instant::now().as_secs() as u32,
        };
        view.render(&mut panel, &frame);

        Timer::after(Duration::from_millis(FRAME_DELAY_MS)).await;
    }
}
