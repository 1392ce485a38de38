//! IOWindow demo - opens a window and logs keyboard input until it is closed

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(windows)]
fn main() {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use iowindow::{log, Config, Keyboard, Win32Window};

    let config = Config::load();
    iowindow::log::init_from_config(&config.logging);
    log!("main() starting with {:?}", config);

    let keyboard = Rc::new(RefCell::new(Keyboard::from_config(&config.keyboard)));
    let mut window = Win32Window::from_config(&config);
    window.set_keyboard_input(&keyboard);

    if let Err(e) = window.make_window_from_config(&config) {
        log!("Fatal: {}", e);
        eprintln!("{}", window.last_error());
        std::process::exit(1);
    }

    let (width, height) = window.window_screen_resolution();
    let (x, y) = window.window_position();
    log!(
        "'{}' at ({}, {}) with client area {}x{}",
        window.window_title(),
        x,
        y,
        width,
        height
    );

    while !window.should_be_closed() {
        window.poll_window_messages();

        let mut keyboard = keyboard.borrow_mut();
        while let Some(event) = keyboard.read_key() {
            match event.key() {
                Some(key) => log!("{:?} {:?}", event.kind, key),
                None => log!("{:?} vk=0x{:02X}", event.kind, event.code),
            }
        }
        drop(keyboard);

        std::thread::sleep(Duration::from_millis(16));
    }

    window.close_window();
    log!("main() exiting");
}

#[cfg(not(windows))]
fn main() {
    eprintln!("iowindow only runs on Windows");
    std::process::exit(1);
}
