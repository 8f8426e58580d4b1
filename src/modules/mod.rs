// Module exports for pure logic
pub mod closed_tabs;  // Recently closed tabs
pub mod gestures;     // Drag and swipe state machines
pub mod navigation;   // Active tab <-> location binding
pub mod tabs;         // Tab registry
