pub struct Icons;

impl Icons {
    pub const BOOKMARK: &str = "🔖";
    pub const BRANCH: &str = "🌿";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const DATABASE: &str = "🗄️";
    pub const CLOCK: &str = "⏱️";
    pub const FIRE: &str = "🔥";
    pub const DEL: &str = "🗑️";
    pub const HOOK: &str = "🪝";
}
