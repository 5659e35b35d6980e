use std::io;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::controller::{ControllerParts, RoleListController};
use crate::directory::RoleDirectory;
use crate::export::CsvExportSink;
use crate::handoff::HandoffSlot;
use crate::lifecycle::ViewLifetime;
use crate::roles::PageQuery;
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler, EventNavigator};
use crate::ui::terminal_guard::setup_terminal;

/// Run the interactive roles screen until the user quits.
pub async fn run(config: &Config, directory: Arc<dyn RoleDirectory>) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let input_lifetime = ViewLifetime::new();
    let mut events = EventHandler::new(tick_rate, input_lifetime.clone());

    let controller = RoleListController::new(
        ControllerParts {
            directory,
            navigator: Arc::new(EventNavigator::new(events.sender())),
            exporter: Arc::new(CsvExportSink::new(&config.export.directory)),
            handoff: HandoffSlot::new(),
            export_name: config.export.base_name.clone(),
        },
        PageQuery::new(config.view.default_page_size),
    );
    let mut changes = controller.subscribe();

    let (mut terminal, guard) = setup_terminal()?;
    let mut app = App::new(controller.clone());

    // Initial load, same as any later query change
    let initial = controller.clone();
    tokio::spawn(async move { initial.refresh().await });

    loop {
        terminal.draw(|frame| app.draw(frame))?;
        if app.should_quit() {
            break;
        }

        tokio::select! {
            event = events.next() => match event {
                Some(AppEvent::Key(key)) => app.handle_key(key),
                Some(AppEvent::Navigate(route)) => app.on_navigate(route),
                Some(AppEvent::Resize) | Some(AppEvent::Tick) => {}
                None => break,
            },
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    controller.unmount();
    input_lifetime.unmount();
    drop(guard);
    Ok(())
}
