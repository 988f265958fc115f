use std::ops::Deref;

mod create;

pub use create::CreateInput;

#[derive(Clone)]
pub struct Command {
    state: cookshare_shared::State,
}

impl Deref for Command {
    type Target = cookshare_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl Command {
    pub fn new(state: cookshare_shared::State) -> Self {
        Self { state }
    }
}
