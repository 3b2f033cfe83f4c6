//! Fixed reply texts and the greeting wrapped around command results.

pub const SAY_MENU: &str =
    "For a command list please type & send-: menu?\nPlease include the question mark.";

pub const REMINDER_GREETING: &str =
    "Please save your email address, by typing & sending-: update email: example@emailprovider.com";

pub const COLD_GREETING: &str = "Hello there, I don't believe we've met before.";

pub const RETURNING_GREETING: &str = "Hey there smarty pants, I see you've been here before.";

pub const NO_COMMAND: &str = "Err:NC, Sorry I couldn't identify a command in your message.";

pub const UNHANDLED_COMMAND: &str = "Err:CF, Something went wrong processing your request.";

pub const UPDATE_ORDER_HELP: &str = "update order 1:newAmount, 3:newAmount, 2:newAmount, ...
where 1, 2 or 3 is the item number as listed in the price list - item order not important.

For items with options please use the format-: 1x3, 3x1, 2x2, ...
The first number is the option's position in the item's list and the second is your desired amount of that option.";

pub const FULL_ORDER_EXAMPLE: &str = "An order of:
12 grams of item 9,
3 of option 1, 2 of option 3 and 1 of option 2 of item 10 and
5 grams of item 6.

Should look like-: update order 9:12, 10: 1x3, 3x2, 2x1, 6:5";

pub const DELETE_ITEM_HELP: &str = "To remove an item from your order, use the update order command with 0 as the new amount like so-: update order X:0
Where X is the item number as listed in the price list";

pub const EMPTY_ORDER_CHECKOUT: &str = "Your current order is empty, there is nothing to check out.";

pub const ORDER_UPDATED: &str = "successfully updated current order";

pub fn main_menu() -> String {
    format!(
        "Main Menu, command list:

fr.prlist? - Prints the price list.

menu? - Prints this menu.
userinfo? - Prints your user info.
currentorder? - Prints your current pending order.
checkoutnow? - Prints a payment link for your current basket.

update email: newEmail
update nickname: newNickname
update social: newSocial
update consent: newConsent

{UPDATE_ORDER_HELP}

{DELETE_ITEM_HELP}"
    )
}

/// Instructions printed ahead of the catalogue in the price list.
pub fn price_list_intro() -> String {
    format!(
        "Welcome,

to save your order please type & send-: {UPDATE_ORDER_HELP}

{FULL_ORDER_EXAMPLE}

To checkout type & send-: checkoutnow?"
    )
}

pub fn field_updated(field: &str, value: &str) -> String {
    format!("successfully updated user info.{field} to {value}")
}

/// Wraps the joined command results (or their absence) for the sender.
///
/// First contact always gets the email reminder and the menu hint. Returning
/// senders only get the hint when nothing in their message was understood.
pub fn compose(user_existed: bool, command_result: Option<&str>) -> String {
    match (user_existed, command_result) {
        (false, Some(result)) => {
            format!("{RETURNING_GREETING}\n\n{result}\n\n{REMINDER_GREETING}\n\n{SAY_MENU}")
        }
        (false, None) => format!("{COLD_GREETING}\n\n{REMINDER_GREETING}\n\n{SAY_MENU}"),
        (true, Some(result)) => result.to_owned(),
        (true, None) => format!("{NO_COMMAND}\n\n{SAY_MENU}"),
    }
}
