use super::DrawCommand;

/// One frame's worth of draw commands.
///
/// A `DrawList` is built on the producer side and handed to the render thread by
/// value; the render thread consumes at most one list per presented frame.
/// Commands keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command. O(1) amortized.
    #[inline]
    pub fn push(&mut self, cmd: DrawCommand) {
        self.commands.push(cmd);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Returns commands in submission order.
    #[inline]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }
}

impl From<Vec<DrawCommand>> for DrawList {
    fn from(commands: Vec<DrawCommand>) -> Self {
        Self { commands }
    }
}

impl FromIterator<DrawCommand> for DrawList {
    fn from_iter<I: IntoIterator<Item = DrawCommand>>(iter: I) -> Self {
        Self { commands: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use glam::Mat4;

    use super::*;
    use crate::scene::{MaterialId, MeshId};

    fn cmd(mesh: u64) -> DrawCommand {
        DrawCommand::new(MeshId(mesh), MaterialId(mesh * 10), Mat4::IDENTITY)
    }

    #[test]
    fn new_list_is_empty() {
        let list = DrawList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn push_keeps_insertion_order() {
        let mut list = DrawList::new();
        list.push(cmd(3));
        list.push(cmd(1));
        list.push(cmd(2));

        let meshes: Vec<u64> = list.iter().map(|c| c.mesh().0).collect();
        assert_eq!(meshes, vec![3, 1, 2]);
    }

    #[test]
    fn collect_from_iterator() {
        let list: DrawList = (1..=4).map(cmd).collect();
        assert_eq!(list.len(), 4);
        assert_eq!(list.commands()[3].material(), MaterialId(40));
    }

    #[test]
    fn command_exposes_transform() {
        let t = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let c = DrawCommand::new(MeshId(7), MaterialId(9), t);
        assert_eq!(*c.transform(), t);
        assert_eq!(c.mesh(), MeshId(7));
    }
}
