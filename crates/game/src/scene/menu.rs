#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    SinglePlayer,
    Multiplayer,
    Quit,
}

impl MenuOption {
    pub fn all() -> &'static [MenuOption] {
        &[
            MenuOption::SinglePlayer,
            MenuOption::Multiplayer,
            MenuOption::Quit,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::SinglePlayer => "Single Player",
            MenuOption::Multiplayer => "Multiplayer",
            MenuOption::Quit => "Quit",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Menu {
    selected: usize,
}

impl Menu {
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_option(&self) -> MenuOption {
        MenuOption::all()[self.selected]
    }

    pub fn move_up(&mut self) {
        let count = MenuOption::all().len();
        self.selected = (self.selected + count - 1) % count;
    }

    pub fn move_down(&mut self) {
        self.selected = (self.selected + 1) % MenuOption::all().len();
    }
}
