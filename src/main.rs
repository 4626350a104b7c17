//! sevenday - seven-day forecast for a city picked from a CSV list

use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use sevenday::action::Action;
use sevenday::api::{DEFAULT_ENDPOINT, ForecastClient};
use sevenday::cities::{self, CitySource};
use sevenday::components::location_picker::{PICKER_HEIGHT, PICKER_WIDTH};
use sevenday::components::{
    Component, ForecastDisplay, ForecastDisplayProps, LocationPicker, LocationPickerProps,
};
use sevenday::effect::Effect;
use sevenday::forecast::{FETCH_FAILED_MESSAGE, Forecast};
use sevenday::location::{SelectedLocation, options_from_records};
use sevenday::reducer::reducer;
use sevenday::state::{AppState, DEFAULT_CITIES_SOURCE, LOADING_ANIM_TICK_MS, LocationSelector};
use sevenday::tasks;
use tracing_subscriber::EnvFilter;
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_components::centered_rect;
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Seven-day forecast for a city picked from a CSV list
#[derive(Parser, Debug)]
#[command(name = "sevenday")]
#[command(about = "Look up the 7Timer! seven-day forecast for a city from a CSV list")]
struct Args {
    /// City list with City,Country,Latitude,Longitude columns (file path or http(s) URL)
    #[arg(long, default_value = DEFAULT_CITIES_SOURCE)]
    cities: String,

    /// City to select at startup (label or label prefix, e.g. "Paris")
    #[arg(long, short)]
    city: Option<String>,

    /// Forecast API endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Fetch once, print the forecast to stdout and exit
    #[arg(long)]
    print: bool,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum ForecastComponentId {
    Display,
    Picker,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum ForecastContext {
    Main,
    Picker,
}

impl EventRoutingState<ForecastComponentId, ForecastContext> for AppState {
    fn focused(&self) -> Option<ForecastComponentId> {
        if self.picker_open {
            Some(ForecastComponentId::Picker)
        } else {
            Some(ForecastComponentId::Display)
        }
    }

    fn modal(&self) -> Option<ForecastComponentId> {
        if self.picker_open {
            Some(ForecastComponentId::Picker)
        } else {
            None
        }
    }

    fn binding_context(&self, id: ForecastComponentId) -> ForecastContext {
        match id {
            ForecastComponentId::Display => ForecastContext::Main,
            ForecastComponentId::Picker => ForecastContext::Picker,
        }
    }

    fn default_context(&self) -> ForecastContext {
        ForecastContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        cities,
        city,
        endpoint,
        print,
        log_file,
        debug: debug_args,
    } = Args::parse();

    init_tracing(log_file.as_deref(), print)?;
    let client = ForecastClient::new(endpoint);

    if print {
        return print_forecast(&cities, city.as_deref(), &client).await;
    }

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let mut state = debug
        .load_state_or_else_async(|| {
            let cities = cities.clone();
            let city = city.clone();
            async move { Ok::<AppState, io::Error>(AppState::new(cities, city)) }
        })
        .await
        .map_err(debug_error)?;

    // A replayed state keeps its data but follows the current command line.
    state.cities_source = cities;
    state.preferred_city = city;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    tracing::info!(endpoint = client.endpoint(), "starting terminal UI");

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions, client).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

/// The terminal UI owns stdout, so logs only go to a file there.
/// `--print` logs warnings to stderr unless a file is given.
fn init_tracing(log_file: Option<&Path>, print: bool) -> io::Result<()> {
    let filter = |default: &str| {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    };

    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter("sevenday=debug"))
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if print => {
            tracing_subscriber::fmt()
                .with_env_filter(filter("sevenday=warn"))
                .with_writer(io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

/// Headless lookup: same loader, selector and fetcher, printed as text.
async fn print_forecast(
    source: &str,
    city: Option<&str>,
    client: &ForecastClient,
) -> io::Result<()> {
    let records = match cities::load_cities(&CitySource::parse(source)).await {
        Ok(records) => records,
        Err(e) => {
            eprintln!("Error: could not load the city list from '{}'.", source);
            eprintln!("Details: {}", e);
            std::process::exit(1);
        }
    };

    let mut selector = LocationSelector::default();
    selector.set_options(options_from_records(&records));
    if let Some(city) = city {
        match selector.position_by_label(city) {
            Some(index) => {
                selector.select(index);
            }
            None => {
                eprintln!("Error: City '{}' is not in {}.", city, source);
                std::process::exit(1);
            }
        }
    }

    let Some(option) = selector.selection() else {
        eprintln!("{}", sevenday::location::SELECT_LOCATION_MESSAGE);
        std::process::exit(1);
    };
    let location = match SelectedLocation::parse(&option.value) {
        Ok(location) => location,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let days = match client
        .fetch_forecast(&location.latitude, &location.longitude)
        .await
    {
        Ok(days) => days,
        Err(e) => {
            tracing::warn!(label = %option.label, error = %e, "forecast lookup failed");
            eprintln!("{}", FETCH_FAILED_MESSAGE);
            std::process::exit(1);
        }
    };

    let forecast = Forecast {
        label: option.label.clone(),
        days,
    };
    println!("{}", forecast.heading());
    for card in forecast.cards() {
        println!(
            "{:<12} {:<10} H: {:<7} L: {:<7} {}",
            card.date, card.condition, card.high, card.low, card.icon
        );
    }
    Ok(())
}

struct ForecastUi {
    display: ForecastDisplay,
    picker: LocationPicker,
}

impl ForecastUi {
    fn new() -> Self {
        Self {
            display: ForecastDisplay,
            picker: LocationPicker::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<ForecastComponentId>,
    ) {
        event_ctx.set_component_area(ForecastComponentId::Display, area);

        let props = ForecastDisplayProps {
            state,
            is_focused: render_ctx.is_focused() && !state.picker_open,
        };
        self.display.render(frame, area, props);

        self.picker.set_open(state.picker_open);
        if state.picker_open {
            let modal_area = centered_rect(PICKER_WIDTH, PICKER_HEIGHT, area);
            event_ctx.set_component_area(ForecastComponentId::Picker, modal_area);
            let props = LocationPickerProps {
                options: &state.selector.options,
                selected: state.picker_selected,
                is_focused: render_ctx.is_focused(),
                on_select: Action::PickerSelect,
            };
            self.picker.render(frame, area, props);
        } else {
            event_ctx
                .component_areas
                .remove(&ForecastComponentId::Picker);
        }
    }

    fn handle_display_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = ForecastDisplayProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .display
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_picker_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        self.picker.set_open(state.picker_open);
        let props = LocationPickerProps {
            options: &state.selector.options,
            selected: state.picker_selected,
            is_focused: true,
            on_select: Action::PickerSelect,
        };
        let actions: Vec<_> = self.picker.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
    client: ForecastClient,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(ForecastUi::new()));
    let mut bus: EventBus<AppState, Action, ForecastComponentId, ForecastContext> =
        EventBus::new();
    let keybindings: Keybindings<ForecastContext> = Keybindings::new();

    let ui_display = Rc::clone(&ui);
    bus.register(ForecastComponentId::Display, move |event, state| {
        ui_display
            .borrow_mut()
            .handle_display_event(&event.kind, state)
    });

    let ui_picker = Rc::clone(&ui);
    bus.register(ForecastComponentId::Picker, move |event, state| {
        ui_picker
            .borrow_mut()
            .handle_picker_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::CitiesFetch),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_ANIM_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &client),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, client: &ForecastClient) {
    match effect {
        Effect::LoadCities { source } => {
            ctx.tasks().spawn("cities", tasks::load_cities(source));
        }
        Effect::FetchForecast {
            request,
            label,
            latitude,
            longitude,
        } => {
            // One key: a newer lookup replaces the one in flight.
            ctx.tasks().spawn(
                "forecast",
                tasks::fetch_forecast(client.clone(), request, label, latitude, longitude),
            );
        }
    }
}
