use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use slint::ComponentHandle;
use static_maps::StaticMapsAPI;

use crate::app::config::{Controls, ViewerConfig};
use crate::app::map_file::MapImageFile;
use crate::app::utils::decode_map_image;
use crate::app::view::{Command, ViewState};
use crate::{MainWindow, MapCommand};

impl From<MapCommand> for Command {
    fn from(command: MapCommand) -> Self {
        match command {
            MapCommand::ZoomIn => Command::ZoomIn,
            MapCommand::ZoomOut => Command::ZoomOut,
            MapCommand::PanNorth => Command::PanNorth,
            MapCommand::PanSouth => Command::PanSouth,
            MapCommand::PanWest => Command::PanWest,
            MapCommand::PanEast => Command::PanEast,
            MapCommand::ToggleStyle => Command::ToggleStyle,
        }
    }
}

/// Fetch/store/load cycle behind the window
pub struct MapSession {
    view: ViewState,
    controls: Controls,
    image_size: (u32, u32),
    api: StaticMapsAPI,
    map_file: MapImageFile,
    runtime: tokio::runtime::Runtime,
}

impl MapSession {
    pub fn new(config: &ViewerConfig, view: ViewState) -> Result<Self> {
        Self::with_api(config, view, StaticMapsAPI::with_base_url(config.base_url.clone()))
    }

    pub fn with_api(config: &ViewerConfig, view: ViewState, api: StaticMapsAPI) -> Result<Self> {
        Ok(Self {
            view,
            controls: config.controls,
            image_size: config.image_size,
            api,
            map_file: MapImageFile::new(config.map_file.clone()),
            runtime: tokio::runtime::Runtime::new()?,
        })
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Fetch the current view, persist it and read it back.
    ///
    /// Blocks the calling thread for the duration of the request.
    pub fn fetch_and_store(&self) -> Result<Vec<u8>> {
        let request = self.view.request(self.image_size);
        info!("Fetching map: zoom={} style={}", request.zoom, request.style.code());

        let bytes = self.runtime.block_on(self.api.fetch_map_image(&request))?;
        self.map_file.store(&bytes)?;
        self.map_file.load()
    }

    /// Apply a window command. `Ok(Some(bytes))` means the view changed and a
    /// new image was fetched; `Ok(None)` means there is nothing to redraw.
    ///
    /// If the fetch fails the previous view is restored, so the state keeps
    /// describing the image still on screen.
    pub fn handle(&mut self, command: Command) -> Result<Option<Vec<u8>>> {
        if !self.controls.allows(command) {
            debug!("Ignoring {:?}, not enabled for this viewer", command);
            return Ok(None);
        }

        let previous = self.view.clone();
        if !self.view.apply(command) {
            debug!("Ignoring {:?}, view already at its limit", command);
            return Ok(None);
        }

        match self.fetch_and_store() {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) => {
                self.view = previous;
                Err(e)
            }
        }
    }

    pub fn close(&self) -> Result<()> {
        self.map_file.remove()
    }
}

/// Show the map window for `view` and block until it is closed.
///
/// The first image is fetched before the window opens, so a bad request
/// fails without ever showing a window. A fetch failure while the window is
/// open closes it and is returned once the image file has been removed.
pub fn run(config: ViewerConfig, view: ViewState) -> Result<()> {
    let session = MapSession::new(&config, view)?;
    let first_image = decode_map_image(&session.fetch_and_store()?)?;

    let main_window = MainWindow::new()?;
    main_window.set_map_image(first_image);
    main_window.set_show_theme_button(config.controls.theme_toggle);

    let session = Rc::new(RefCell::new(session));
    let failure: Rc<RefCell<Option<anyhow::Error>>> = Rc::new(RefCell::new(None));

    let main_window_weak = main_window.as_weak();
    let callback_session = session.clone();
    let callback_failure = failure.clone();
    main_window.on_command(move |command| {
        let Some(window) = main_window_weak.upgrade() else {
            return;
        };

        let result = callback_session
            .borrow_mut()
            .handle(command.into())
            .and_then(|bytes| bytes.map(|b| decode_map_image(&b)).transpose());

        match result {
            Ok(Some(image)) => window.set_map_image(image),
            Ok(None) => {}
            Err(e) => {
                error!("Failed to update map: {:#}", e);
                *callback_failure.borrow_mut() = Some(e);
                if let Err(e) = slint::quit_event_loop() {
                    error!("Failed to close map window: {}", e);
                }
            }
        }
    });

    info!("Map window open");
    main_window.run()?;
    info!("Map window closed");

    let fetch_failure = failure.borrow_mut().take();
    let closed = session.borrow().close();
    shutdown_result(fetch_failure, closed)
}

/// A fetch failure that ended the session wins over a failure to remove the
/// image file, which is only logged in that case.
fn shutdown_result(fetch_failure: Option<anyhow::Error>, closed: Result<()>) -> Result<()> {
    match (fetch_failure, closed) {
        (Some(e), Err(close_error)) => {
            error!("{:#}", close_error);
            Err(e)
        }
        (Some(e), Ok(())) => Err(e),
        (None, closed) => closed,
    }
}
