/*
 * Tascam Controls - User Interface Module
 * Version: 1.0
 * Copyright (c) 2025 Tascam Controls contributors
 * Under MIT License
 * Feel free to share and modify
 *
 * Control panel window for the TASCAM US-144MKII
 */

use std::rc::Rc;

use gtk::prelude::*;
use gtk::{
    Application, ApplicationWindow, Box as GtkBox, Button, ButtonsType, ComboBoxText,
    DialogFlags, Frame, Grid, Label, MessageDialog, MessageType, Orientation, Window,
};

use crate::mixer::MixerAdapter;

pub const LATENCY_PROFILE_CONTROL: &str = "Latency Profile";
pub const PLAYBACK_ROUTING_CONTROL: &str = "Playback Routing";
pub const SAMPLE_RATE_CONTROL: &str = "Sample Rate";
pub const DRIVER_VERSION_ATTR: &str = "driver_version";

/// Dropdown item order is the driver's enum order; the active position is
/// written to the control verbatim.
pub const LATENCY_ITEMS: [&str; 3] = ["Low", "Normal", "High"];
pub const ROUTING_ITEMS: [&str; 3] = ["Stereo to All", "Swapped", "Digital In to All"];

pub struct ControlPanel {
    pub window: ApplicationWindow,
    pub driver_version_label: Label,
    pub sample_rate_label: Label,
    pub latency_combo: ComboBoxText,
    pub routing_combo: ComboBoxText,
}

impl ControlPanel {
    pub fn new(app: &Application, adapter: MixerAdapter) -> Self {
        let adapter = Rc::new(adapter);

        let window = ApplicationWindow::new(app);
        window.set_title("TASCAM US-144MKII Control Panel");
        window.set_default_size(520, 420);
        window.set_resizable(false);

        // Menu bar with Help -> About
        let menu_bar = gtk::MenuBar::new();
        let help_menu = gtk::Menu::new();
        let help_menu_item = gtk::MenuItem::with_label("Help");
        help_menu_item.set_submenu(Some(&help_menu));

        let about_item = gtk::MenuItem::with_label("About");
        let driver_version = adapter.read_sysfs_attr(DRIVER_VERSION_ATTR);
        let about_driver_version = driver_version.clone();
        about_item.connect_activate(move |_| {
            show_about_dialog(&about_driver_version);
        });

        help_menu.append(&about_item);
        menu_bar.append(&help_menu_item);

        let main_box = GtkBox::new(Orientation::Vertical, 12);
        main_box.set_margin_top(18);
        main_box.set_margin_bottom(18);
        main_box.set_margin_start(18);
        main_box.set_margin_end(18);
        main_box.pack_start(&menu_bar, false, false, 0);

        // ===== STATUS SECTION =====
        let (status_frame, status_box) = create_section_box("Device Status");

        let info_grid = Grid::new();
        info_grid.set_row_spacing(4);
        info_grid.set_column_spacing(12);

        let driver_version_label = add_info_row(&info_grid, 0, "Driver Version:", "N/A");
        add_info_row(&info_grid, 1, "Device:", "US-144 MKII");
        add_info_row(&info_grid, 2, "Sample Width:", "24 bits");
        let sample_rate_label = add_info_row(&info_grid, 3, "Sample Rate:", "N/A");
        add_info_row(&info_grid, 4, "Sample Clock Source:", "internal");
        add_info_row(&info_grid, 5, "Digital Input Status:", "unavailable");

        status_box.pack_start(&info_grid, false, false, 0);

        // ===== SETTINGS SECTION =====
        let (settings_frame, settings_box) = create_section_box("Device Settings");

        let (latency_box, latency_combo) =
            create_control_combo("Audio Performance", &LATENCY_ITEMS);
        // The clock source and output format are fixed by the driver; the
        // dropdowns only mirror the hardware panel.
        let (clock_box, clock_combo) =
            create_control_combo("Sample Clock Source", &["Internal", "Auto"]);
        clock_combo.set_active(Some(0));
        clock_combo.set_sensitive(false);
        let (format_box, format_combo) = create_control_combo("Digital Output Format", &["S/PDIF"]);
        format_combo.set_active(Some(0));
        format_combo.set_sensitive(false);
        let (routing_box, routing_combo) = create_control_combo("LINE OUTPUTS", &ROUTING_ITEMS);

        settings_box.pack_start(&latency_box, false, false, 0);
        settings_box.pack_start(&clock_box, false, false, 0);
        settings_box.pack_start(&format_box, false, false, 0);
        settings_box.pack_start(&routing_box, false, false, 0);

        // ===== ACTIONS SECTION =====
        let button_box = GtkBox::new(Orientation::Horizontal, 6);
        button_box.set_halign(gtk::Align::End);
        let exit_button = Button::with_label("Exit");
        button_box.pack_start(&exit_button, false, false, 0);

        let window_clone = window.clone();
        exit_button.connect_clicked(move |_| {
            window_clone.close();
        });

        // ===== ASSEMBLE MAIN INTERFACE =====
        main_box.pack_start(&status_frame, false, false, 0);
        main_box.pack_start(&settings_frame, false, false, 0);
        main_box.pack_start(&button_box, false, false, 0);
        window.add(&main_box);

        let panel = Self {
            window,
            driver_version_label,
            sample_rate_label,
            latency_combo,
            routing_combo,
        };

        // Current values must land in the combos before the changed
        // handlers are connected, or startup would echo them back into
        // the driver.
        panel.load_dynamic_settings(&adapter, &driver_version);
        panel.setup_signals(&adapter);

        panel
    }

    fn load_dynamic_settings(&self, adapter: &MixerAdapter, driver_version: &str) {
        self.driver_version_label.set_text(driver_version);

        let rate = adapter.read_int(SAMPLE_RATE_CONTROL);
        self.sample_rate_label.set_text(&format_sample_rate(rate));

        let latency = adapter.read_int(LATENCY_PROFILE_CONTROL);
        self.latency_combo.set_active(Some(clamp_index(latency, LATENCY_ITEMS.len())));

        let routing = adapter.read_int(PLAYBACK_ROUTING_CONTROL);
        self.routing_combo.set_active(Some(clamp_index(routing, ROUTING_ITEMS.len())));
    }

    fn setup_signals(&self, adapter: &Rc<MixerAdapter>) {
        let latency_adapter = Rc::clone(adapter);
        self.latency_combo.connect_changed(move |combo| {
            if let Some(index) = combo.active() {
                if !latency_adapter.write_int(LATENCY_PROFILE_CONTROL, index as i64) {
                    eprintln!("Failed to set {}", LATENCY_PROFILE_CONTROL);
                }
            }
        });

        let routing_adapter = Rc::clone(adapter);
        self.routing_combo.connect_changed(move |combo| {
            if let Some(index) = combo.active() {
                if !routing_adapter.write_int(PLAYBACK_ROUTING_CONTROL, index as i64) {
                    eprintln!("Failed to set {}", PLAYBACK_ROUTING_CONTROL);
                }
            }
        });
    }
}

fn add_info_row(grid: &Grid, row: i32, label_text: &str, value_text: &str) -> Label {
    let label = Label::new(None);
    label.set_markup(&format!("<b>{}</b>", label_text));
    label.set_halign(gtk::Align::Start);

    let value_label = Label::new(Some(value_text));
    value_label.set_halign(gtk::Align::Start);

    grid.attach(&label, 0, row, 1, 1);
    grid.attach(&value_label, 1, row, 1, 1);
    value_label
}

fn create_control_combo(label_text: &str, items: &[&str]) -> (GtkBox, ComboBoxText) {
    let container = GtkBox::new(Orientation::Vertical, 2);

    let label = Label::new(None);
    label.set_markup(&format!("<b>{}</b>", label_text));
    label.set_halign(gtk::Align::Start);

    let combo = ComboBoxText::new();
    for item in items {
        combo.append_text(item);
    }

    container.pack_start(&label, false, false, 0);
    container.pack_start(&combo, false, false, 0);
    (container, combo)
}

pub fn create_section_box(title: &str) -> (Frame, GtkBox) {
    let title_label = Label::new(None);
    title_label.set_markup(&format!("<b>{}</b>", title));

    let frame = Frame::new(None);
    frame.set_label_widget(Some(&title_label));
    frame.set_margin_top(4);
    frame.set_margin_bottom(4);

    let section_box = GtkBox::new(Orientation::Vertical, 8);
    section_box.set_margin_top(8);
    section_box.set_margin_bottom(8);
    section_box.set_margin_start(10);
    section_box.set_margin_end(10);

    frame.add(&section_box);

    (frame, section_box)
}

/// Sample rate as reported by the driver, 0 when no stream is active.
pub fn format_sample_rate(rate: i64) -> String {
    if rate > 0 {
        format!("{:.1} kHz", rate as f64 / 1000.0)
    } else {
        "N/A (inactive)".to_string()
    }
}

fn clamp_index(value: i64, items: usize) -> u32 {
    value.clamp(0, items as i64 - 1) as u32
}

/// Fatal startup dialog: the device is not connected or the driver is not
/// loaded. Blocks until dismissed; the caller exits afterwards.
pub fn show_device_not_found_dialog() {
    let dialog = MessageDialog::new::<Window>(
        None,
        DialogFlags::MODAL,
        MessageType::Error,
        ButtonsType::Ok,
        "TASCAM US-144MKII Not Found",
    );
    dialog.set_title("Error");
    dialog.set_secondary_text(Some(
        "Please ensure the device is connected and the 'us144mkii' driver is loaded.",
    ));
    dialog.run();
    dialog.close();
}

pub fn show_about_dialog(driver_version: &str) {
    let dialog = gtk::AboutDialog::new();

    dialog.set_title("About TASCAM US-144MKII Control Panel");
    dialog.set_program_name("TASCAM US-144MKII Control Panel");
    dialog.set_version(Some(env!("CARGO_PKG_VERSION")));
    dialog.set_website(Some("https://github.com/serifpersia/us144mkii"));
    dialog.set_comments(Some(&format!(
        "Graphical interface for the TASCAM US-144MKII audio interface on Linux, \
         using the 'us144mkii' ALSA driver.\n\nDriver version: {}",
        driver_version
    )));
    dialog.set_license_type(gtk::License::MitX11);
    dialog.set_modal(true);

    dialog.connect_response(|dialog, _| {
        dialog.close();
    });

    dialog.show_all();
}
