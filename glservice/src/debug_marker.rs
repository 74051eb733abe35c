/// Tracks `glPushGroupMarkerEXT` / `glInsertEventMarkerEXT` state
///
/// Each group remembers its full dotted name and the last marker inserted in it, so that log lines
/// can say which part of the client's frame was executing.
#[derive(Debug)]
pub struct DebugMarkerManager {
    groups: Vec<Group>,
}

#[derive(Debug)]
struct Group {
    name: String,
    marker: String,
}

impl Group {
    fn new(name: String) -> Self {
        Self {
            marker: name.clone(),
            name,
        }
    }
}

impl Default for DebugMarkerManager {
    fn default() -> Self {
        Self {
            groups: vec![Group::new(String::new())],
        }
    }
}

impl DebugMarkerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current marker, empty when no group or marker has been set
    pub fn marker(&self) -> &str {
        &self.current().marker
    }

    pub fn set_marker(&mut self, marker: &str) {
        let group = self.current_mut();
        group.marker = if group.name.is_empty() {
            marker.to_owned()
        } else {
            format!("{}.{}", group.name, marker)
        };
    }

    pub fn push_group(&mut self, name: &str) {
        let parent = &self.current().name;
        let name = if parent.is_empty() {
            name.to_owned()
        } else {
            format!("{}.{}", parent, name)
        };

        self.groups.push(Group::new(name));
    }

    /// Pop the innermost group; the root group is never popped
    pub fn pop_group(&mut self) {
        if self.groups.len() > 1 {
            self.groups.pop();
        }
    }

    fn current(&self) -> &Group {
        // The root group is never popped
        &self.groups[self.groups.len() - 1]
    }

    fn current_mut(&mut self) -> &mut Group {
        let last = self.groups.len() - 1;
        &mut self.groups[last]
    }
}
