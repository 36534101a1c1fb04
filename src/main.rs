use bevy::prelude::*;

fn main() -> AppExit {
    match arcade_shooter::game::run() {
        Ok(exit) => exit,
        Err(err) => {
            eprintln!("cannot start: {err}");
            AppExit::from_code(1)
        }
    }
}
