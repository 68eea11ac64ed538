//! Static HTML responses

/// Form field carrying the submitted username
pub const USERNAME_FIELD: &str = "discord";

pub const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html>
    <head>
        <title>Hi!</title>
    </head>
    <body style="font-family: Arial, sans-serif; text-align: center; margin-top: 100px;">
        <h2>Hi! Please enter your Discord username!</h2>
        <form method="POST" action="/submit">
            <input type="text" name="discord" placeholder="Discord username" style="padding: 8px; width: 250px;" required />
            <button type="submit" style="padding: 8px 16px;">Submit</button>
        </form>
    </body>
</html>
"#;

pub const THANK_YOU_PAGE: &str = r#"<!DOCTYPE html>
<html>
    <head>
        <title>Thank you!</title>
    </head>
    <body style="font-family: Arial, sans-serif; text-align: center; margin-top: 100px;">
        <h2>Thanks for submitting your Discord username!</h2>
    </body>
</html>
"#;
