//=========================================================================
// Event Bus
//=========================================================================
//
// Synchronous publish/subscribe table keyed by event code.
//
// Architecture:
//   register(code, listener, callback) → table[code]: DynArray<Registration>
//                                              ↓
//   fire(code, sender, context) ──────→ callbacks in registration order
//                                              ↓
//                                   first `true` = handled, stop
//
// Lifecycle: new() → initialize() → register/fire/unregister → shutdown()
//
// Dispatch runs on the caller's thread and returns only when a callback
// reports the event handled or the list is exhausted. Callbacks receive
// the bus itself and may fire, register or unregister while a dispatch
// is in progress: `fire` iterates over the list as it was when the call
// started.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

//=== External Crates =====================================================

use log::{debug, info, trace, warn};

//=== Internal Modules ====================================================

use super::{EventCode, EventContext};
use crate::core::containers::DynArray;

//=== Constants ===========================================================

/// Number of addressable event codes (`0..MAX_EVENT_CODES`).
pub const MAX_EVENT_CODES: usize = 16384;

//=== ObjectId ============================================================

/// Opaque, address-sized identity of a listener or sender.
///
/// The bus only compares identities and hands them back to callbacks; it
/// never dereferences them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

impl ObjectId {
    /// Wraps an arbitrary token.
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Uses the address of `value` as identity.
    pub fn of<T: ?Sized>(value: &T) -> Self {
        Self(value as *const T as *const () as usize)
    }

    /// Raw token value.
    pub const fn raw(self) -> usize {
        self.0
    }
}

//=== Event ===============================================================

/// Everything a callback learns about one dispatched event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Code the event was fired with.
    pub code: EventCode,

    /// Identity passed by the producer, if any.
    pub sender: Option<ObjectId>,

    /// Identity the receiving callback was registered with.
    pub listener: Option<ObjectId>,

    /// Payload (see [`EventCode`] for system lane layouts).
    pub context: EventContext,
}

//=== EventListener =======================================================

/// Callback capability stored in the bus.
///
/// Return `true` to mark the event handled and stop it from reaching
/// listeners registered after this one.
///
/// Implemented for every `FnMut(&EventBus, &Event) -> bool` closure.
pub trait EventListener {
    /// Handles one event.
    fn on_event(&mut self, bus: &EventBus, event: &Event) -> bool;
}

impl<F> EventListener for F
where
    F: FnMut(&EventBus, &Event) -> bool,
{
    fn on_event(&mut self, bus: &EventBus, event: &Event) -> bool {
        self(bus, event)
    }
}

/// Shared handle to a callback. Its allocation address is the callback
/// identity used for duplicate detection and removal.
pub type SharedListener = Rc<RefCell<dyn EventListener>>;

/// Wraps `listener` into a [`SharedListener`].
pub fn shared_listener<L: EventListener + 'static>(listener: L) -> SharedListener {
    Rc::new(RefCell::new(listener))
}

//=== Registration ========================================================

/// One (listener, callback) pair stored for an event code.
#[derive(Clone)]
struct Registration {
    listener: Option<ObjectId>,
    callback: SharedListener,
}

impl Registration {
    fn same_callback(&self, callback: &SharedListener) -> bool {
        // Compare data addresses only; vtable pointers are not unique.
        Rc::as_ptr(&self.callback) as *const () == Rc::as_ptr(callback) as *const ()
    }
}

//=== CodeTable ===========================================================

/// Per-code registration lists, created lazily on first registration.
struct CodeTable {
    entries: Vec<Option<DynArray<Registration>>>,
}

impl CodeTable {
    fn new() -> Self {
        Self {
            entries: (0..MAX_EVENT_CODES).map(|_| None).collect(),
        }
    }

    fn list(&self, code: EventCode) -> Option<&DynArray<Registration>> {
        self.entries.get(usize::from(code.raw()))?.as_ref()
    }

    fn list_mut(&mut self, code: EventCode) -> Option<&mut DynArray<Registration>> {
        self.entries.get_mut(usize::from(code.raw()))?.as_mut()
    }
}

//=== EventBus ============================================================

/// Event code table with ordered, short-circuiting dispatch.
///
/// Every operation on an uninitialized bus fails with `false`. The bus is
/// single-threaded (`!Send`): callbacks are shared through `Rc`.
///
/// # Examples
///
/// ```
/// use aetheric_core::core::event::{shared_listener, EventBus, EventCode, EventContext};
///
/// let bus = EventBus::new();
/// assert!(bus.initialize());
///
/// let on_key = shared_listener(|_bus: &EventBus, event: &aetheric_core::core::event::Event| {
///     event.context.u16(0) == 65
/// });
/// assert!(bus.register(EventCode::KEY_PRESSED, None, &on_key));
///
/// let handled = bus.fire(EventCode::KEY_PRESSED, None, EventContext::new().with_u16(0, 65));
/// assert!(handled);
///
/// bus.shutdown();
/// ```
pub struct EventBus {
    table: RefCell<Option<CodeTable>>,

    /// Snapshot storage reused across dispatches. Nested `fire` calls find
    /// it taken and use their own.
    dispatch_buffer: Cell<Vec<Registration>>,
}

impl EventBus {
    //--- Lifecycle --------------------------------------------------------

    /// Creates an uninitialized bus.
    pub fn new() -> Self {
        Self {
            table: RefCell::new(None),
            dispatch_buffer: Cell::new(Vec::new()),
        }
    }

    /// Allocates the code table.
    ///
    /// Returns `false` (and changes nothing) if already initialized.
    pub fn initialize(&self) -> bool {
        let mut table = self.table.borrow_mut();
        if table.is_some() {
            return false;
        }

        *table = Some(CodeTable::new());
        info!(target: "event", "Event bus initialized ({} codes)", MAX_EVENT_CODES);
        true
    }

    /// Destroys every registration list and returns to the
    /// uninitialized state.
    pub fn shutdown(&self) {
        let Some(table) = self.table.borrow_mut().take() else {
            debug!(target: "event", "Shutdown requested on an uninitialized event bus");
            return;
        };

        let mut destroyed = 0;
        for list in table.entries.into_iter().flatten() {
            list.destroy();
            destroyed += 1;
        }

        info!(target: "event", "Event bus shut down ({} listener lists destroyed)", destroyed);
    }

    /// Returns `true` between [`initialize`](Self::initialize) and
    /// [`shutdown`](Self::shutdown).
    pub fn is_initialized(&self) -> bool {
        self.table.borrow().is_some()
    }

    //--- Registration -----------------------------------------------------

    /// Subscribes `callback` to `code` under the `listener` identity.
    ///
    /// Returns `false` if the bus is uninitialized, the code is outside
    /// the table, or the same (listener, callback) pair is already
    /// registered for `code`.
    pub fn register(
        &self,
        code: EventCode,
        listener: Option<ObjectId>,
        callback: &SharedListener,
    ) -> bool {
        let mut guard = self.table.borrow_mut();
        let Some(table) = guard.as_mut() else {
            debug!(target: "event", "register({}) on an uninitialized event bus", code);
            return false;
        };

        let Some(slot) = table.entries.get_mut(usize::from(code.raw())) else {
            warn!(target: "event", "register: code {} is outside the event table", code);
            return false;
        };

        let list = slot.get_or_insert_with(DynArray::new);

        let duplicate = list
            .iter()
            .any(|entry| entry.listener == listener && entry.same_callback(callback));
        if duplicate {
            warn!(
                target: "event",
                "Duplicate registration for {} (listener: {:?}) rejected",
                code,
                listener
            );
            return false;
        }

        list.push(Registration {
            listener,
            callback: Rc::clone(callback),
        });
        trace!(target: "event", "Registered listener {:?} for {}", listener, code);
        true
    }

    /// Removes the first registration for `code` whose listener **or**
    /// callback matches.
    ///
    /// Returns `false` if the bus is uninitialized, nothing was ever
    /// registered for `code`, or no entry matches. Remaining entries keep
    /// their order.
    pub fn unregister(
        &self,
        code: EventCode,
        listener: Option<ObjectId>,
        callback: &SharedListener,
    ) -> bool {
        let mut guard = self.table.borrow_mut();
        let Some(table) = guard.as_mut() else {
            debug!(target: "event", "unregister({}) on an uninitialized event bus", code);
            return false;
        };

        let Some(list) = table.list_mut(code) else {
            warn!(target: "event", "unregister: nothing is registered for {}", code);
            return false;
        };

        let position = list
            .iter()
            .position(|entry| entry.listener == listener || entry.same_callback(callback));

        match position {
            Some(index) => {
                let removed = list.pop_at(index).is_ok();
                if removed {
                    trace!(target: "event", "Unregistered listener {:?} from {}", listener, code);
                }
                removed
            }
            None => {
                debug!(target: "event", "unregister: no match for {} (listener: {:?})", code, listener);
                false
            }
        }
    }

    //--- Dispatch ---------------------------------------------------------

    /// Delivers an event to the callbacks registered for `code`, in
    /// registration order.
    ///
    /// Returns `true` as soon as a callback reports the event handled;
    /// later callbacks are not invoked. Returns `false` if no callback
    /// handled it, or if the bus is uninitialized or has nothing
    /// registered for `code`.
    ///
    /// A callback that is already running further up the call stack is
    /// skipped rather than re-entered.
    pub fn fire(&self, code: EventCode, sender: Option<ObjectId>, context: EventContext) -> bool {
        let mut registrations = {
            let guard = self.table.borrow();
            let Some(table) = guard.as_ref() else {
                debug!(target: "event", "fire({}) on an uninitialized event bus", code);
                return false;
            };

            let Some(list) = table.list(code).filter(|list| !list.is_empty()) else {
                trace!(target: "event", "fire: nothing is registered for {}", code);
                return false;
            };

            let mut buffer = self.dispatch_buffer.take();
            buffer.extend(list.iter().cloned());
            buffer
        };

        let handled = self.deliver(code, sender, context, &registrations);

        // Keep whichever buffer has more room if a nested dispatch stored one
        registrations.clear();
        let stored = self.dispatch_buffer.take();
        if stored.capacity() > registrations.capacity() {
            self.dispatch_buffer.set(stored);
        } else {
            self.dispatch_buffer.set(registrations);
        }

        handled
    }

    fn deliver(
        &self,
        code: EventCode,
        sender: Option<ObjectId>,
        context: EventContext,
        registrations: &[Registration],
    ) -> bool {
        for registration in registrations {
            let event = Event {
                code,
                sender,
                listener: registration.listener,
                context,
            };

            let handled = match registration.callback.try_borrow_mut() {
                Ok(mut callback) => callback.on_event(self, &event),
                Err(_) => {
                    warn!(
                        target: "event",
                        "Listener {:?} is already dispatching; skipped re-entrant {}",
                        registration.listener,
                        code
                    );
                    false
                }
            };

            if handled {
                trace!(target: "event", "{} handled by listener {:?}", code, registration.listener);
                return true;
            }
        }

        false
    }

    #[cfg(test)]
    fn dispatch_buffer_capacity(&self) -> usize {
        let buffer = self.dispatch_buffer.take();
        let capacity = buffer.capacity();
        self.dispatch_buffer.set(buffer);
        capacity
    }

    //--- Queries ----------------------------------------------------------

    /// Number of registrations for `code`.
    pub fn listener_count(&self, code: EventCode) -> usize {
        self.table
            .borrow()
            .as_ref()
            .and_then(|table| table.list(code))
            .map_or(0, DynArray::length)
    }

    /// Bytes reserved by all registration lists.
    pub fn allocated_bytes(&self) -> usize {
        self.table.borrow().as_ref().map_or(0, |table| {
            table
                .entries
                .iter()
                .flatten()
                .map(DynArray::allocated_bytes)
                .sum()
        })
    }
}

//--- Trait Implementations -----------------------------------------------

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.table.borrow();
        let active_codes = guard
            .as_ref()
            .map_or(0, |table| table.entries.iter().flatten().filter(|l| !l.is_empty()).count());

        f.debug_struct("EventBus")
            .field("initialized", &guard.is_some())
            .field("active_codes", &active_codes)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    //--- Test Helpers -----------------------------------------------------

    type Log = Rc<RefCell<Vec<(&'static str, Event)>>>;

    /// Records every event it receives and answers with `handles`.
    struct Recorder {
        name: &'static str,
        handles: bool,
        log: Log,
    }

    impl EventListener for Recorder {
        fn on_event(&mut self, _bus: &EventBus, event: &Event) -> bool {
            self.log.borrow_mut().push((self.name, *event));
            self.handles
        }
    }

    fn recorder(name: &'static str, handles: bool, log: &Log) -> SharedListener {
        shared_listener(Recorder {
            name,
            handles,
            log: Rc::clone(log),
        })
    }

    fn initialized_bus() -> EventBus {
        let bus = EventBus::new();
        assert!(bus.initialize());
        bus
    }

    fn names(log: &Log) -> Vec<&'static str> {
        log.borrow().iter().map(|(name, _)| *name).collect()
    }

    //=====================================================================
    // Lifecycle Tests
    //=====================================================================

    #[test]
    fn initialize_twice_fails() {
        let bus = EventBus::new();
        assert!(!bus.is_initialized());
        assert!(bus.initialize());
        assert!(!bus.initialize(), "second initialize must be rejected");
        assert!(bus.is_initialized());
    }

    #[test]
    fn operations_fail_before_initialize() {
        let bus = EventBus::new();
        let log = Log::default();
        let a = recorder("a", false, &log);

        assert!(!bus.register(EventCode::KEY_PRESSED, None, &a));
        assert!(!bus.unregister(EventCode::KEY_PRESSED, None, &a));
        assert!(!bus.fire(EventCode::KEY_PRESSED, None, EventContext::new()));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn shutdown_drops_registrations_and_allows_reinitialize() {
        let bus = initialized_bus();
        let log = Log::default();
        let a = recorder("a", false, &log);

        assert!(bus.register(EventCode::RESIZE, None, &a));
        assert_eq!(Rc::strong_count(&a), 2);

        bus.shutdown();
        assert!(!bus.is_initialized());
        assert_eq!(Rc::strong_count(&a), 1, "bus must release its callback handles");
        assert!(!bus.fire(EventCode::RESIZE, None, EventContext::new()));

        assert!(bus.initialize());
        assert_eq!(bus.listener_count(EventCode::RESIZE), 0);
    }

    //=====================================================================
    // Registration Tests
    //=====================================================================

    #[test]
    fn duplicate_pair_is_rejected() {
        let bus = initialized_bus();
        let log = Log::default();
        let callback = recorder("c", false, &log);
        let listener = Some(ObjectId::from_raw(0xA));

        assert!(bus.register(EventCode::KEY_PRESSED, listener, &callback));
        assert!(!bus.register(EventCode::KEY_PRESSED, listener, &callback));
        assert_eq!(bus.listener_count(EventCode::KEY_PRESSED), 1);
    }

    #[test]
    fn same_callback_with_other_listener_is_accepted() {
        let bus = initialized_bus();
        let log = Log::default();
        let callback = recorder("c", false, &log);

        assert!(bus.register(EventCode::KEY_PRESSED, Some(ObjectId::from_raw(1)), &callback));
        assert!(bus.register(EventCode::KEY_PRESSED, Some(ObjectId::from_raw(2)), &callback));
        assert!(bus.register(EventCode::KEY_PRESSED, None, &callback));
        assert_eq!(bus.listener_count(EventCode::KEY_PRESSED), 3);
    }

    #[test]
    fn same_pair_on_other_code_is_accepted() {
        let bus = initialized_bus();
        let log = Log::default();
        let callback = recorder("c", false, &log);

        assert!(bus.register(EventCode::KEY_PRESSED, None, &callback));
        assert!(bus.register(EventCode::KEY_RELEASED, None, &callback));
    }

    #[test]
    fn codes_outside_the_table_are_rejected() {
        let bus = initialized_bus();
        let log = Log::default();
        let callback = recorder("c", false, &log);
        let code = EventCode::new(MAX_EVENT_CODES as u16);

        assert!(!bus.register(code, None, &callback));
        assert!(!bus.fire(code, None, EventContext::new()));
        assert!(!bus.unregister(code, None, &callback));
    }

    #[test]
    fn list_grows_through_dyn_array() {
        let bus = initialized_bus();
        let log = Log::default();
        let code = EventCode::application(1);

        let callbacks: Vec<SharedListener> = (0..5).map(|_| recorder("x", false, &log)).collect();
        for (i, callback) in callbacks.iter().enumerate() {
            assert!(bus.register(code, Some(ObjectId::from_raw(i)), callback));
        }

        assert_eq!(bus.listener_count(code), 5);
        let stride = std::mem::size_of::<Registration>();
        assert_eq!(bus.allocated_bytes(), 8 * stride);
    }

    //=====================================================================
    // Unregister Tests
    //=====================================================================

    #[test]
    fn unregister_removes_and_preserves_order() {
        let bus = initialized_bus();
        let log = Log::default();
        let a = recorder("a", false, &log);
        let b = recorder("b", false, &log);
        let c = recorder("c", false, &log);
        let code = EventCode::KEY_RELEASED;

        bus.register(code, Some(ObjectId::from_raw(1)), &a);
        bus.register(code, Some(ObjectId::from_raw(2)), &b);
        bus.register(code, Some(ObjectId::from_raw(3)), &c);

        assert!(bus.unregister(code, Some(ObjectId::from_raw(2)), &b));
        assert_eq!(bus.listener_count(code), 2);

        bus.fire(code, None, EventContext::new());
        assert_eq!(names(&log), vec!["a", "c"]);
    }

    #[test]
    fn unregister_matches_on_listener_or_callback() {
        let bus = initialized_bus();
        let log = Log::default();
        let a = recorder("a", false, &log);
        let b = recorder("b", false, &log);
        let unrelated = recorder("u", false, &log);
        let code = EventCode::MOUSE_MOVED;

        bus.register(code, Some(ObjectId::from_raw(1)), &a);
        bus.register(code, Some(ObjectId::from_raw(2)), &b);

        // Listener identity alone is enough
        assert!(bus.unregister(code, Some(ObjectId::from_raw(1)), &unrelated));
        // Callback identity alone is enough
        assert!(bus.unregister(code, Some(ObjectId::from_raw(99)), &b));
        assert_eq!(bus.listener_count(code), 0);
    }

    #[test]
    fn unregister_without_registrations_fails() {
        let bus = initialized_bus();
        let log = Log::default();
        let a = recorder("a", false, &log);

        assert!(!bus.unregister(EventCode::MOUSE_WHEEL, None, &a));
    }

    #[test]
    fn unregister_without_match_fails() {
        let bus = initialized_bus();
        let log = Log::default();
        let a = recorder("a", false, &log);
        let b = recorder("b", false, &log);

        bus.register(EventCode::MOUSE_WHEEL, Some(ObjectId::from_raw(1)), &a);
        assert!(!bus.unregister(EventCode::MOUSE_WHEEL, Some(ObjectId::from_raw(2)), &b));
        assert_eq!(bus.listener_count(EventCode::MOUSE_WHEEL), 1);
    }

    //=====================================================================
    // Dispatch Tests
    //=====================================================================

    #[test]
    fn fire_without_registrations_returns_false() {
        let bus = initialized_bus();
        assert!(!bus.fire(EventCode::RESIZE, None, EventContext::new()));
    }

    #[test]
    fn fire_reuses_dispatch_storage() {
        let bus = initialized_bus();
        let log = Log::default();
        let listeners: Vec<SharedListener> = ["a", "b", "c"]
            .into_iter()
            .map(|name| recorder(name, false, &log))
            .collect();
        for listener in &listeners {
            bus.register(EventCode::MOUSE_MOVED, None, listener);
        }

        bus.fire(EventCode::MOUSE_MOVED, None, EventContext::new());
        let capacity = bus.dispatch_buffer_capacity();
        assert!(capacity >= 3);

        for _ in 0..10 {
            bus.fire(EventCode::MOUSE_MOVED, None, EventContext::new());
        }
        assert_eq!(bus.dispatch_buffer_capacity(), capacity);
        assert_eq!(log.borrow().len(), 33);
    }

    #[test]
    fn fire_after_last_unregister_returns_false() {
        let bus = initialized_bus();
        let log = Log::default();
        let only = recorder("only", true, &log);

        bus.register(EventCode::KEY_RELEASED, None, &only);
        bus.unregister(EventCode::KEY_RELEASED, None, &only);

        assert!(!bus.fire(EventCode::KEY_RELEASED, None, EventContext::new()));
        assert!(log.borrow().is_empty());
        assert_eq!(bus.dispatch_buffer_capacity(), 0);
    }

    #[test]
    fn fire_stops_at_first_handler() {
        let bus = initialized_bus();
        let log = Log::default();
        let first = recorder("first", false, &log);
        let second = recorder("second", true, &log);
        let third = recorder("third", false, &log);
        let code = EventCode::application(0);

        bus.register(code, Some(ObjectId::from_raw(1)), &first);
        bus.register(code, Some(ObjectId::from_raw(2)), &second);
        bus.register(code, Some(ObjectId::from_raw(3)), &third);

        assert!(bus.fire(code, None, EventContext::new()));
        assert_eq!(names(&log), vec!["first", "second"]);
    }

    #[test]
    fn fire_reaches_everyone_when_unhandled() {
        let bus = initialized_bus();
        let log = Log::default();
        let a = recorder("a", false, &log);
        let b = recorder("b", false, &log);

        bus.register(EventCode::KEY_PRESSED, None, &a);
        bus.register(EventCode::KEY_PRESSED, None, &b);

        assert!(!bus.fire(EventCode::KEY_PRESSED, None, EventContext::new()));
        assert_eq!(names(&log), vec!["a", "b"]);
    }

    #[test]
    fn callback_receives_code_sender_listener_and_payload() {
        let bus = initialized_bus();
        let log = Log::default();
        let a = recorder("a", false, &log);
        let listener = Some(ObjectId::from_raw(0x1000));
        let sender = Some(ObjectId::from_raw(0x2000));

        bus.register(EventCode::KEY_PRESSED, listener, &a);
        bus.fire(EventCode::KEY_PRESSED, sender, EventContext::new().with_u16(0, 65));

        let log = log.borrow();
        assert_eq!(log.len(), 1);
        let (_, event) = log[0];
        assert_eq!(event.code, EventCode::KEY_PRESSED);
        assert_eq!(event.code.raw(), 0x02);
        assert_eq!(event.context.u16(0), 65);
        assert_eq!(event.listener, listener);
        assert_eq!(event.sender, sender);
    }

    #[test]
    fn closures_are_listeners() {
        let bus = initialized_bus();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let callback = shared_listener(move |_: &EventBus, _: &Event| {
            counter.set(counter.get() + 1);
            false
        });

        bus.register(EventCode::MOUSE_WHEEL, None, &callback);
        bus.fire(EventCode::MOUSE_WHEEL, None, EventContext::new());
        bus.fire(EventCode::MOUSE_WHEEL, None, EventContext::new());
        assert_eq!(hits.get(), 2);
    }

    //=====================================================================
    // Reentrancy Tests
    //=====================================================================

    #[test]
    fn callback_can_fire_another_code() {
        let bus = initialized_bus();
        let log = Log::default();
        let quit = recorder("quit", true, &log);
        let on_key = shared_listener(|bus: &EventBus, _: &Event| {
            bus.fire(EventCode::APPLICATION_QUIT, None, EventContext::new())
        });

        bus.register(EventCode::APPLICATION_QUIT, None, &quit);
        bus.register(EventCode::KEY_PRESSED, None, &on_key);

        assert!(bus.fire(EventCode::KEY_PRESSED, None, EventContext::new()));
        assert_eq!(names(&log), vec!["quit"]);
    }

    #[test]
    fn callback_can_unregister_itself_during_dispatch() {
        let bus = initialized_bus();
        let log = Log::default();
        let later = recorder("later", false, &log);
        let slot: Rc<RefCell<Option<SharedListener>>> = Rc::default();

        let handle = Rc::clone(&slot);
        let once = shared_listener(move |bus: &EventBus, event: &Event| {
            if let Some(me) = handle.borrow().as_ref() {
                bus.unregister(event.code, event.listener, me);
            }
            false
        });
        *slot.borrow_mut() = Some(Rc::clone(&once));

        let code = EventCode::application(2);
        bus.register(code, Some(ObjectId::from_raw(1)), &once);
        bus.register(code, Some(ObjectId::from_raw(2)), &later);

        bus.fire(code, None, EventContext::new());
        assert_eq!(bus.listener_count(code), 1);
        assert_eq!(names(&log), vec!["later"], "snapshot keeps later listeners");

        // Break the cycle
        slot.borrow_mut().take();
    }

    #[test]
    fn recursive_fire_skips_running_callback() {
        let bus = initialized_bus();
        let depth = Rc::new(Cell::new(0));
        let seen = Rc::clone(&depth);
        let code = EventCode::application(3);

        let echo = shared_listener(move |bus: &EventBus, event: &Event| {
            seen.set(seen.get() + 1);
            bus.fire(event.code, None, EventContext::new())
        });
        bus.register(code, None, &echo);

        assert!(!bus.fire(code, None, EventContext::new()));
        assert_eq!(depth.get(), 1);
    }
}
