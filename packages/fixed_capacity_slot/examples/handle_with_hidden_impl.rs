//! Demonstrates a public handle type whose implementation details live in a fixed-size slot.
//!
//! The `Window` handle has the same size no matter how its private `Impl` evolves, as long as
//! `Impl` keeps fitting into the slot. Nothing is allocated on the heap for the handle itself.

mod window {
    use fixed_capacity_slot::FixedCapacitySlot;

    /// Implementation details that users of `Window` never see.
    #[derive(Clone, Debug, Default)]
    struct Impl {
        title: String,
        width: u32,
        height: u32,
        vsync: bool,
        frames_presented: u64,
        clear_color: [f32; 4],
    }

    /// A public handle with a stable footprint.
    #[derive(Clone, Debug, Default)]
    pub(crate) struct Window {
        inner: FixedCapacitySlot<Impl, 256>,
    }

    impl Window {
        pub(crate) fn new(title: &str, width: u32, height: u32) -> Self {
            Self {
                inner: FixedCapacitySlot::new(Impl {
                    title: title.to_string(),
                    width,
                    height,
                    vsync: true,
                    frames_presented: 0,
                    clear_color: [0.0, 0.0, 0.0, 1.0],
                }),
            }
        }

        pub(crate) fn title(&self) -> &str {
            &self.inner.title
        }

        pub(crate) fn size(&self) -> (u32, u32) {
            (self.inner.width, self.inner.height)
        }

        pub(crate) fn set_clear_color(&mut self, color: [f32; 4]) {
            self.inner.clear_color = color;
        }

        pub(crate) fn clear_color(&self) -> [f32; 4] {
            self.inner.clear_color
        }

        pub(crate) fn is_vsync_enabled(&self) -> bool {
            self.inner.vsync
        }

        pub(crate) fn present(&mut self) {
            self.inner.frames_presented = self.inner.frames_presented.wrapping_add(1);
        }

        pub(crate) fn frames_presented(&self) -> u64 {
            self.inner.frames_presented
        }

        /// Moves the window state into a new handle, leaving a default window behind.
        pub(crate) fn take(&mut self) -> Self {
            Self {
                inner: self.inner.take(),
            }
        }
    }
}

use window::Window;

fn main() {
    println!("Window handle footprint: {} bytes", size_of::<Window>());

    let mut main_window = Window::new("Main", 1280, 720);
    main_window.set_clear_color([0.1, 0.2, 0.3, 1.0]);
    main_window.present();
    main_window.present();

    println!(
        "{} is {:?} with vsync {}, {} frames presented, clear color {:?}",
        main_window.title(),
        main_window.size(),
        main_window.is_vsync_enabled(),
        main_window.frames_presented(),
        main_window.clear_color()
    );

    // Value semantics: the clone has its own copy of the implementation.
    let mut mirror = main_window.clone();
    mirror.present();
    assert_eq!(main_window.frames_presented(), 2);
    assert_eq!(mirror.frames_presented(), 3);

    // Moving out leaves a valid, default window behind.
    let moved = main_window.take();
    assert_eq!(moved.title(), "Main");
    assert_eq!(main_window.title(), "");
    println!("Moved window: {moved:?}");
    println!("Window left behind: {main_window:?}");
}
