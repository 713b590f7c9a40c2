//! Canned replies for the built-in rule table.

pub(super) const FEATURES: &str = "\
    Resezy offers a comprehensive suite of restaurant management features:\n\
    \n\
    - **Order Management** - Handle dine-in, takeaway, and delivery orders\n\
    - **POS & Billing** - Fast and efficient point of sale system\n\
    - **Menu Management** - Easy product and category management\n\
    - **Table Management** - Track tables and reservations\n\
    - **Staff Management** - Attendance, leave, and salary tracking\n\
    - **Inventory Control** - Stock management and alerts\n\
    - **Financial Reports** - Revenue, expenses, and profit analysis\n\
    - **Customer Reviews** - Collect and manage feedback\n\
    - **Promo Codes** - Create discounts and offers\n\
    \n\
    Would you like to know more about any specific feature?";

pub(super) const PRICING: &str = "\
    We offer flexible pricing plans to suit every restaurant:\n\
    \n\
    - **Free Plan** - ৳0/month: Up to 50 products, 100 orders/month, Basic features\n\
    - **Basic Plan** - ৳999/month: Up to 200 products, Unlimited orders, Staff management\n\
    - **Premium Plan** - ৳2,499/month: Unlimited products, All features included, Priority support\n\
    - **Enterprise Plan** - ৳9,999/month: Multi-branch support, White-label option, Dedicated support\n\
    \n\
    All plans come with a 14-day free trial!";

pub(super) const GETTING_STARTED: &str = "\
    Getting started with Resezy is easy!\n\
    \n\
    - **Step 1:** Click on 'Get Started' and create your account\n\
    - **Step 2:** Set up your restaurant profile\n\
    - **Step 3:** Add your menu items\n\
    - **Step 4:** Configure payment methods\n\
    - **Step 5:** Start taking orders!\n\
    \n\
    The whole setup takes less than 30 minutes. Plus, you get a 14-day free trial to explore all features.\n\
    \n\
    Would you like me to guide you through any specific step?";

pub(super) const PAYMENTS: &str = "\
    Resezy supports multiple payment gateways:\n\
    \n\
    - **bKash** - Mobile banking payments\n\
    - **Nagad** - Digital payment solution\n\
    - **SSLCommerz** - Card payments (Visa, Mastercard)\n\
    - **Cash** - Traditional cash payments\n\
    \n\
    Each restaurant can configure their own payment credentials, and payments go directly to your account. We only charge a monthly subscription fee - no commission on your sales!";

pub(super) const SUPPORT: &str = "\
    You can reach our support team through:\n\
    \n\
    - **Email:** support@resezy.com\n\
    - **Phone:** +880 1XXX-XXXXXX\n\
    - **Live Chat:** Available on our website\n\
    - **Office Hours:** 9 AM - 10 PM (Everyday)\n\
    \n\
    For Enterprise customers, we offer dedicated 24/7 support.";

pub(super) const COMPANY: &str = "\
    Resezy is developed by **Bridge Byte Tech**, a software development company specializing in SaaS solutions.\n\
    \n\
    We're passionate about helping restaurants streamline their operations with modern, easy-to-use technology.\n\
    \n\
    Our team combines expertise in restaurant operations with cutting-edge software development to create solutions that truly make a difference.";

pub(super) const INVENTORY: &str = "\
    Our Inventory Management system helps you:\n\
    \n\
    - **Track Stock Levels** - Real-time inventory updates\n\
    - **Low Stock Alerts** - Never run out of ingredients\n\
    - **Supplier Management** - Manage vendor information\n\
    - **Purchase Orders** - Create and track orders\n\
    - **Stock Reports** - Analyze usage patterns\n\
    \n\
    The system automatically updates when orders are placed, giving you accurate stock information at all times.";

pub(super) const STAFF: &str = "\
    Resezy includes complete staff management:\n\
    \n\
    - **Attendance Tracking** - Daily check-in/check-out\n\
    - **Leave Management** - Request and approve leaves\n\
    - **Salary Management** - Calculate and track payments\n\
    - **Role-Based Access** - Manager, Kitchen, Cashier, Waiter, Delivery\n\
    - **Performance Reports** - Track staff efficiency\n\
    \n\
    Staff can access their portal through the same platform - no separate app needed!";

pub(super) const RESERVATIONS: &str = "\
    Our Table & Reservation system includes:\n\
    \n\
    - **Table Management** - Visual table layout\n\
    - **Online Reservations** - Customers can book online\n\
    - **Availability Calendar** - Manage time slots\n\
    - **Reservation Reminders** - Automatic notifications\n\
    - **Walk-in Management** - Handle walk-in customers\n\
    \n\
    Customers can make reservations through your restaurant website!";

pub(super) const GREETING: &str = "\
    Hello! Welcome to Resezy. I'm here to help you learn about our restaurant management platform.\n\
    \n\
    You can ask me about:\n\
    - Features and capabilities\n\
    - Pricing plans\n\
    - How to get started\n\
    - Payment methods\n\
    - And much more!\n\
    \n\
    What would you like to know?";

pub(super) const THANKS: &str = "\
    You're welcome! I'm glad I could help.\n\
    \n\
    If you have any more questions about Resezy, feel free to ask. You can also:\n\
    \n\
    - Visit our Features page for detailed information\n\
    - Check out our Pricing plans\n\
    - Contact our support team for personalized assistance\n\
    \n\
    Have a great day!";

pub(super) const FALLBACK: &str = "\
    Thanks for your question! I can help you with:\n\
    \n\
    - **Features** - What Resezy offers\n\
    - **Pricing** - Our subscription plans\n\
    - **Getting Started** - How to begin\n\
    - **Payments** - Supported payment methods\n\
    - **Support** - How to contact us\n\
    \n\
    Could you please tell me more about what you'd like to know?";
