mod paths;

use std::fs::File;

use aurora::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

const ITEMS: [&str; 4] = ["Games", "Settings", "Notifications", "Crash"];

/// Detail page pushed when an item is opened. B goes back.
fn open_detail(ui: &mut Ui, title: &str) {
    let tree = ui.tree_mut();
    let page = tree.insert(BoxLayout::vertical().padding(32.0).with_background());
    let heading = tree.insert(Label::new(title));
    let back = tree.insert(Label::focusable("Back"));
    tree.add_child(page, heading);
    tree.add_child(page, back);

    tree.register_action(page, "Back", Buttons::B, false, |ui| {
        ui.pop_view(ViewAnimation::SlideRight);
        true
    });
    tree.register_action(back, "Back", Buttons::A, false, |ui| {
        ui.pop_view(ViewAnimation::SlideRight);
        true
    });

    log::debug!("opening {} page", title);
    ui.push_view(page, ViewAnimation::SlideLeft);
}

fn main_menu(ui: &mut Ui) -> ViewId {
    let tree = ui.tree_mut();
    let menu = tree.insert(
        BoxLayout::vertical()
            .padding(48.0)
            .spacing(8.0)
            .with_background(),
    );
    let title = tree_label(tree, "aurora demo", false);
    tree.add_child(menu, title);

    for item in ITEMS {
        let label = tree_label(tree, item, true);
        tree.add_child(menu, label);

        match item {
            "Notifications" => {
                tree.register_action(label, "Notify", Buttons::A, false, |ui| {
                    ui.notify("Hello from aurora");
                    true
                });
            }
            "Crash" => {
                tree.register_action(label, "Crash", Buttons::A, false, |ui| {
                    log::warn!("crash requested from the menu");
                    ui.crash("The demo crashed on purpose. Press A to quit.");
                    true
                });
            }
            title => {
                tree.register_action(label, "Open", Buttons::A, false, move |ui| {
                    open_detail(ui, title);
                    true
                });
            }
        }
    }

    tree.register_action(menu, "Notify", Buttons::X, false, |ui| {
        ui.notify("X pressed");
        true
    });
    menu
}

fn tree_label(tree: &mut ViewTree, text: &str, focusable: bool) -> ViewId {
    if focusable {
        tree.insert(Label::focusable(text))
    } else {
        tree.insert(Label::new(text))
    }
}

fn main() {
    let log_file = File::create(paths::log_file()).expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    log::info!("aurora demo starting");

    let config = AppConfig::new("aurora demo");
    let mut app = match Application::init(DesktopDriver::new(), config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("failed to initialize: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let menu = main_menu(app.ui_mut());
    log::info!("pushing main menu");
    app.ui_mut().push_view(menu, ViewAnimation::Fade);
    app.run();
    log::info!("aurora demo exited");
}
